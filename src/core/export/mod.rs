//! Export orchestration
//!
//! - [`ExportCoordinator`] drives a run: discovery, provider file, worker pool
//! - [`ExportSummary`] and [`ExportOutcome`] report what happened

pub mod coordinator;
pub mod summary;

pub use coordinator::{CompletionCounter, ExportCoordinator};
pub use summary::{ExportOutcome, ExportSummary};
