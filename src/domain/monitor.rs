//! Synthetic monitor domain models
//!
//! These types mirror the NerdGraph entity outline for synthetic monitors and
//! the per-monitor detail payloads (steps and scripts). They're immutable once
//! fetched; the export coordinator owns them for the duration of a run.

use super::ids::MonitorGuid;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A tag attached to a monitor entity
///
/// Golden tags only carry a key; regular tags carry an ordered value list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorTag {
    pub key: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub values: Vec<String>,
}

impl MonitorTag {
    /// Create a tag with values
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a key-only tag, as used by golden tags
    pub fn key_only(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Vec::new(),
        }
    }

    /// First value of the tag, if any
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// NerdGraph sends `null` for empty collections as often as it omits them
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Container for the inherited "golden" tags of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenTags {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<MonitorTag>,
}

/// A synthetic monitor as returned by the entity search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorEntity {
    /// Globally unique entity identifier
    pub guid: MonitorGuid,

    /// Display name
    pub name: String,

    /// Raw monitor type tag (e.g. `BROWSER`)
    pub monitor_type: String,

    /// Monitored URL, only meaningful for some monitor types
    #[serde(default)]
    pub monitored_url: Option<String>,

    /// Inherited tags, excluded from explicit re-emission
    #[serde(default, deserialize_with = "null_as_default")]
    pub golden_tags: GoldenTags,

    /// Regular tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<MonitorTag>,
}

impl MonitorEntity {
    /// Classify this entity by its type tag
    pub fn kind(&self) -> MonitorKind {
        MonitorKind::from_type_tag(&self.monitor_type)
    }

    /// First tag with the given key that carries at least one value
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .filter(|tag| tag.key == key)
            .find_map(MonitorTag::first_value)
    }
}

/// One step of a multi-step monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorStep {
    /// Position in the execution order
    pub ordinal: i64,
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

/// Closed set of monitor kinds the exporter knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorKind {
    /// `BROWSER` monitors
    Simple,
    /// `STEP_MONITOR` monitors
    Step,
    /// `SCRIPT_BROWSER` monitors
    Script,
    /// Any other type tag
    Unsupported,
}

impl MonitorKind {
    /// Map a NerdGraph `monitorType` to a kind
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "BROWSER" => MonitorKind::Simple,
            "STEP_MONITOR" => MonitorKind::Step,
            "SCRIPT_BROWSER" => MonitorKind::Script,
            _ => MonitorKind::Unsupported,
        }
    }

    /// Terraform resource type rendered for this kind
    pub fn resource_type(&self) -> Option<&'static str> {
        match self {
            MonitorKind::Simple => Some(SIMPLE_MONITOR_RESOURCE),
            MonitorKind::Step => Some(STEP_MONITOR_RESOURCE),
            MonitorKind::Script => Some(SCRIPT_MONITOR_RESOURCE),
            MonitorKind::Unsupported => None,
        }
    }
}

pub const SIMPLE_MONITOR_RESOURCE: &str = "newrelic_synthetics_monitor";
pub const STEP_MONITOR_RESOURCE: &str = "newrelic_synthetics_monitor_step";
pub const SCRIPT_MONITOR_RESOURCE: &str = "newrelic_synthetics_script_monitor";

/// Instruction for adopting an existing remote resource into Terraform state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportDirective {
    /// Terraform resource type
    pub resource: String,
    /// Canonical resource name
    pub name: String,
    /// Identifier in the source system
    pub id: MonitorGuid,
}

impl ImportDirective {
    pub fn new(resource: impl Into<String>, name: impl Into<String>, id: MonitorGuid) -> Self {
        Self {
            resource: resource.into(),
            name: name.into(),
            id,
        }
    }

    /// Terraform address, `<type>.<name>`
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource, self.name)
    }

    /// Equivalent `terraform import` invocation
    pub fn import_command(&self) -> String {
        format!("terraform import {} {}", self.address(), self.id)
    }
}

impl fmt::Display for ImportDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.address(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_deserializes_from_nerdgraph_outline() {
        let entity: MonitorEntity = serde_json::from_value(json!({
            "guid": "g1",
            "name": "Login Check",
            "monitorType": "BROWSER",
            "monitoredUrl": "https://example.com/login",
            "goldenTags": { "tags": [{ "key": "account" }] },
            "tags": [
                { "key": "publicLocation", "values": ["Washington, DC, USA"] },
                { "key": "account" }
            ]
        }))
        .unwrap();

        assert_eq!(entity.guid.as_str(), "g1");
        assert_eq!(entity.kind(), MonitorKind::Simple);
        assert_eq!(entity.golden_tags.tags, vec![MonitorTag::key_only("account")]);
        assert_eq!(entity.tags[1].values.len(), 0);
        assert_eq!(entity.tag_value("publicLocation"), Some("Washington, DC, USA"));
        assert_eq!(entity.tag_value("account"), None);
    }

    #[test]
    fn test_entity_tolerates_missing_optional_fields() {
        let entity: MonitorEntity = serde_json::from_value(json!({
            "guid": "g2",
            "name": "Bare",
            "monitorType": "SIMPLE",
            "monitoredUrl": null
        }))
        .unwrap();

        assert!(entity.monitored_url.is_none());
        assert!(entity.tags.is_empty());
        assert!(entity.golden_tags.tags.is_empty());
        assert_eq!(entity.kind(), MonitorKind::Unsupported);
    }

    #[test]
    fn test_entity_treats_null_collections_as_empty() {
        let entity: MonitorEntity = serde_json::from_value(json!({
            "guid": "g3",
            "name": "Nulls",
            "monitorType": "BROWSER",
            "goldenTags": null,
            "tags": [{ "key": "publicLocation", "values": null }]
        }))
        .unwrap();
        assert!(entity.golden_tags.tags.is_empty());
        assert!(entity.tags[0].values.is_empty());

        let entity: MonitorEntity = serde_json::from_value(json!({
            "guid": "g4",
            "name": "Null Tags",
            "monitorType": "BROWSER",
            "goldenTags": { "tags": null },
            "tags": null
        }))
        .unwrap();
        assert!(entity.golden_tags.tags.is_empty());
        assert!(entity.tags.is_empty());

        let step: MonitorStep = serde_json::from_value(json!({
            "ordinal": 2,
            "type": "NAVIGATE",
            "values": null
        }))
        .unwrap();
        assert!(step.values.is_empty());
    }

    #[test]
    fn test_step_deserializes_type_field() {
        let step: MonitorStep = serde_json::from_value(json!({
            "ordinal": 0,
            "type": "NAVIGATE",
            "values": ["https://example.com"]
        }))
        .unwrap();

        assert_eq!(step.step_type, "NAVIGATE");
        assert_eq!(step.ordinal, 0);
    }

    #[test]
    fn test_monitor_kind_mapping() {
        assert_eq!(MonitorKind::from_type_tag("BROWSER"), MonitorKind::Simple);
        assert_eq!(MonitorKind::from_type_tag("STEP_MONITOR"), MonitorKind::Step);
        assert_eq!(MonitorKind::from_type_tag("SCRIPT_BROWSER"), MonitorKind::Script);
        assert_eq!(MonitorKind::from_type_tag("SCRIPT_API"), MonitorKind::Unsupported);
        assert_eq!(MonitorKind::from_type_tag("browser"), MonitorKind::Unsupported);
        assert_eq!(MonitorKind::Unsupported.resource_type(), None);
        assert_eq!(
            MonitorKind::Step.resource_type(),
            Some("newrelic_synthetics_monitor_step")
        );
    }

    #[test]
    fn test_import_directive_rendering() {
        let directive = ImportDirective::new(
            SIMPLE_MONITOR_RESOURCE,
            "login_check",
            MonitorGuid::new("g1").unwrap(),
        );

        assert_eq!(directive.address(), "newrelic_synthetics_monitor.login_check");
        assert_eq!(
            directive.import_command(),
            "terraform import newrelic_synthetics_monitor.login_check g1"
        );
    }
}
