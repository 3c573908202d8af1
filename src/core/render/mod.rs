//! Monitor rendering
//!
//! Turns a [`MonitorEntity`] into a Terraform resource document and an
//! [`ImportDirective`]. Every supported monitor kind shares the same
//! scaffold (name, type, locations, schedule, runtime, tags), built by
//! [`MonitorRenderer::render_common`]; the per-kind modules add their own
//! attributes and nested blocks on top of it.
//!
//! Rendering has three outcomes:
//! - [`RenderOutcome::Exported`]: the document was written and a directive
//!   is returned
//! - [`RenderOutcome::Skipped`]: the monitor can't be exported (unsupported
//!   type, or no mapped public location); this is not an error
//! - `Err(..)`: a detail fetch or the document write failed

pub mod output;
pub mod provider;
pub mod script;
pub mod simple;
pub mod step;

pub use output::DocumentWriter;
pub use provider::{provider_document, provider_file_name};

use crate::adapters::nerdgraph::DetailFetcher;
use crate::core::hcl::{Block, Body, Document, Value};
use crate::core::lookup::{index_of, index_of_with_field};
use crate::core::naming::to_snake_case;
use crate::domain::{ExporterError, ImportDirective, MonitorEntity, MonitorKind, MonitorTag, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Public location display names and their region codes
pub const REGION_TABLE: &[(&str, &str)] = &[
    ("Montreal, Québec, CA", "CA_CENTRAL_1"),
    ("Washington, DC, USA", "US_EAST_1"),
    ("Columbus, OH, USA", "US_EAST_2"),
    ("San Francisco, CA, USA", "US_WEST_1"),
    ("Portland, OR, USA", "US_WEST_2"),
];

/// Check intervals in minutes and their symbolic names
pub const PERIOD_TABLE: &[(&str, &str)] = &[
    ("1", "EVERY_MINUTE"),
    ("5", "EVERY_5_MINUTES"),
    ("10", "EVERY_10_MINUTES"),
    ("15", "EVERY_15_MINUTES"),
    ("30", "EVERY_30_MINUTES"),
    ("60", "EVERY_HOUR"),
    ("360", "EVERY_6_HOURS"),
    ("720", "EVERY_12_HOURS"),
    ("1440", "EVERY_DAY"),
];

pub const DEFAULT_PERIOD: &str = "EVERY_MINUTE";
pub const DEFAULT_STATUS: &str = "ENABLED";

/// Tag keys that are rendered as attributes or set by the platform, and so
/// are never emitted as explicit `tag` blocks
pub const IMPUTED_TAGS: &[&str] = &[
    "publicLocation",
    "period",
    "monitorStatus",
    "runtimeType",
    "runtimeTypeVersion",
    "responseValidationText",
    "scriptLanguage",
    "monitorType",
    "accountId",
    "account",
];

/// Lookup tables used while rendering
///
/// Built once and shared read-only by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTables {
    regions: HashMap<String, String>,
    periods: HashMap<String, String>,
}

impl RenderTables {
    pub fn new<R, P, K, V>(regions: R, periods: P) -> Self
    where
        R: IntoIterator<Item = (K, V)>,
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            periods: periods.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Region code of a public location, if it is mapped
    pub fn region_code(&self, location: &str) -> Option<&str> {
        self.regions.get(location).map(String::as_str)
    }

    /// Symbolic interval for a period in minutes, if it is mapped
    pub fn interval(&self, minutes: &str) -> Option<&str> {
        self.periods.get(minutes).map(String::as_str)
    }
}

impl Default for RenderTables {
    fn default() -> Self {
        Self::new(REGION_TABLE.iter().copied(), PERIOD_TABLE.iter().copied())
    }
}

/// Why a monitor was not exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// None of the monitor's public locations maps to a region
    NoRegions,
    /// The monitor type has no renderer
    UnsupportedType,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoRegions => write!(f, "no mapped public locations"),
            SkipReason::UnsupportedType => write!(f, "unsupported monitor type"),
        }
    }
}

/// Result of rendering one monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Exported(ImportDirective),
    Skipped(SkipReason),
}

/// A resource document under construction
///
/// Holds the shared scaffold; kind-specific renderers add attributes with
/// [`attributes_mut`](Self::attributes_mut) and nested blocks with
/// [`append_block`](Self::append_block), then call [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct ResourceDraft {
    resource_type: &'static str,
    name: String,
    display_name: String,
    monitor_type: String,
    locations: Vec<String>,
    period: String,
    status: String,
    runtime_type: Option<String>,
    runtime_type_version: Option<String>,
    tags: Vec<MonitorTag>,
    attributes: Body,
    blocks: Vec<Block>,
}

impl ResourceDraft {
    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    /// Canonical resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind-specific attributes, written after the schedule attributes
    pub fn attributes_mut(&mut self) -> &mut Body {
        &mut self.attributes
    }

    /// Kind-specific nested block, written after the tag blocks
    pub fn append_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Assemble the final document
    pub fn finish(self) -> Document {
        let mut document = Document::new();
        let resource = document
            .body_mut()
            .append_new_block("resource", [self.resource_type.to_string(), self.name]);
        let body = resource.body_mut();

        body.set_attribute_value("name", self.display_name);
        body.set_attribute_value("type", self.monitor_type);
        body.set_attribute_value("locations_public", Value::string_list(self.locations));

        body.append_newline();
        body.set_attribute_value("period", self.period);
        body.set_attribute_value("status", self.status);
        if let Some(runtime_type) = self.runtime_type {
            body.set_attribute_value("runtime_type", runtime_type);
        }
        if let Some(runtime_type_version) = self.runtime_type_version {
            body.set_attribute_value("runtime_type_version", runtime_type_version);
        }

        if !self.attributes.is_empty() {
            body.append_newline();
            body.append_body(self.attributes);
        }

        if !self.tags.is_empty() || !self.blocks.is_empty() {
            body.append_newline();
        }
        for tag in self.tags {
            let block = body.append_new_block("tag", Vec::<String>::new());
            block.body_mut().set_attribute_value("key", tag.key);
            block
                .body_mut()
                .set_attribute_value("value", Value::string_list(tag.values));
        }
        for block in self.blocks {
            body.append_block(block);
        }

        document
    }
}

/// Renders monitors into documents on disk
#[derive(Clone)]
pub struct MonitorRenderer {
    tables: Arc<RenderTables>,
    fetcher: DetailFetcher,
    writer: DocumentWriter,
    account_id: i64,
}

impl MonitorRenderer {
    pub fn new(
        tables: Arc<RenderTables>,
        fetcher: DetailFetcher,
        writer: DocumentWriter,
        account_id: i64,
    ) -> Self {
        Self {
            tables,
            fetcher,
            writer,
            account_id,
        }
    }

    pub fn writer(&self) -> &DocumentWriter {
        &self.writer
    }

    /// Render one monitor, write its document and return the outcome
    ///
    /// # Errors
    ///
    /// Returns [`ExporterError::RemoteQuery`] if a step or script fetch
    /// fails and [`ExporterError::RenderWrite`] if the document can't be
    /// written. Skips are not errors.
    pub async fn render(&self, monitor: &MonitorEntity) -> Result<RenderOutcome> {
        let kind = monitor.kind();
        let Some(resource_type) = kind.resource_type() else {
            return Ok(RenderOutcome::Skipped(SkipReason::UnsupportedType));
        };

        let name = to_snake_case(&monitor.name);
        let Some(draft) = self.render_common(resource_type, &name, monitor) else {
            return Ok(RenderOutcome::Skipped(SkipReason::NoRegions));
        };

        let document = match kind {
            MonitorKind::Simple => simple::render(draft, monitor),
            MonitorKind::Step => step::render(draft, monitor, &self.fetcher, self.account_id).await?,
            MonitorKind::Script => {
                script::render(draft, monitor, &self.fetcher, self.account_id).await?
            }
            MonitorKind::Unsupported => {
                return Ok(RenderOutcome::Skipped(SkipReason::UnsupportedType))
            }
        };

        self.writer
            .write_document(&name, &document)
            .await
            .map_err(ExporterError::RenderWrite)?;

        Ok(RenderOutcome::Exported(ImportDirective::new(
            resource_type,
            name,
            monitor.guid.clone(),
        )))
    }

    /// Build the shared scaffold for a monitor
    ///
    /// Returns `None` when no public location maps to a region code; such a
    /// monitor is not exportable.
    pub fn render_common(
        &self,
        resource_type: &'static str,
        name: &str,
        monitor: &MonitorEntity,
    ) -> Option<ResourceDraft> {
        let mut locations = Vec::new();
        let mut period = DEFAULT_PERIOD.to_string();
        let mut status = DEFAULT_STATUS.to_string();
        let mut runtime_type = None;
        let mut runtime_type_version = None;
        let mut tags = Vec::new();

        for tag in &monitor.tags {
            match tag.key.as_str() {
                "publicLocation" => locations.extend(
                    tag.values
                        .iter()
                        .filter_map(|location| self.tables.region_code(location))
                        .map(str::to_string),
                ),
                "period" => {
                    period = tag
                        .first_value()
                        .and_then(|minutes| self.tables.interval(minutes))
                        .unwrap_or(DEFAULT_PERIOD)
                        .to_string();
                }
                "monitorStatus" => {
                    if let Some(value) = tag.first_value() {
                        status = value.to_uppercase();
                    }
                }
                "runtimeType" => {
                    runtime_type = tag.first_value().filter(|v| !v.is_empty()).map(str::to_string);
                }
                "runtimeTypeVersion" => {
                    runtime_type_version =
                        tag.first_value().filter(|v| !v.is_empty()).map(str::to_string);
                }
                _ => {}
            }

            if is_explicit_tag(tag, monitor) {
                tags.push(tag.clone());
            }
        }

        if locations.is_empty() {
            return None;
        }

        Some(ResourceDraft {
            resource_type,
            name: name.to_string(),
            display_name: monitor.name.clone(),
            monitor_type: monitor.monitor_type.clone(),
            locations,
            period,
            status,
            runtime_type,
            runtime_type_version,
            tags,
            attributes: Body::default(),
            blocks: Vec::new(),
        })
    }
}

/// Whether a tag is re-emitted as its own `tag` block
fn is_explicit_tag(tag: &MonitorTag, monitor: &MonitorEntity) -> bool {
    !tag.values.is_empty()
        && index_of_with_field(tag, &monitor.golden_tags.tags, "key").is_none()
        && index_of(&tag.key.as_str(), IMPUTED_TAGS).is_none()
}
