//! Domain models and types for tfsynth.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`MonitorGuid`])
//! - **Monitor models** ([`MonitorEntity`], [`MonitorTag`], [`MonitorStep`], [`MonitorKind`])
//! - **Export output** ([`ImportDirective`])
//! - **Error types** ([`ExporterError`], [`RemoteQueryError`], [`RenderWriteError`])
//! - **Result type alias** ([`Result`])

pub mod errors;
pub mod ids;
pub mod monitor;
pub mod result;

pub use errors::{ExporterError, RemoteQueryError, RenderWriteError, PARTIAL_FAILURE_HEADER};
pub use ids::MonitorGuid;
pub use monitor::{
    GoldenTags, ImportDirective, MonitorEntity, MonitorKind, MonitorStep, MonitorTag,
    SCRIPT_MONITOR_RESOURCE, SIMPLE_MONITOR_RESOURCE, STEP_MONITOR_RESOURCE,
};
pub use result::Result;
