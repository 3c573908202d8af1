//! Export summary and outcome
//!
//! This module defines the counters reported at the end of a run and the
//! [`ExportOutcome`] handed back to the caller.

use crate::domain::{ExporterError, ImportDirective};
use std::time::Duration;

/// Counters of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Monitors returned by the entity search
    pub discovered: usize,

    /// Monitors put on the work queue after id filtering
    pub dispatched: usize,

    /// Monitors rendered and written
    pub exported: usize,

    /// Monitors skipped because no public location maps to a region
    pub skipped_no_regions: usize,

    /// Monitors skipped because their type has no renderer
    pub skipped_unsupported: usize,

    /// Monitors that failed with a hard error
    pub failed: usize,

    /// Completion signals observed while draining
    pub completions: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl ExportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_no_regions + self.skipped_unsupported
    }

    /// Whether no monitor failed
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            discovered = self.discovered,
            dispatched = self.dispatched,
            exported = self.exported,
            skipped = self.total_skipped(),
            failed = self.failed,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if self.total_skipped() > 0 {
            tracing::info!(
                no_regions = self.skipped_no_regions,
                unsupported_type = self.skipped_unsupported,
                "Some monitors were not exported"
            );
        }

        if !self.is_successful() {
            tracing::warn!(failed = self.failed, "Export completed with errors");
        }
    }
}

/// Aggregate result of one export run
///
/// `directives` is unordered. `error` is set if and only if at least one
/// monitor failed; in that case some directives are missing.
#[derive(Debug)]
pub struct ExportOutcome {
    pub directives: Vec<ImportDirective>,
    pub error: Option<ExporterError>,
    pub summary: ExportSummary,
}

impl ExportOutcome {
    /// Outcome of a run with nothing to do
    pub fn empty(summary: ExportSummary) -> Self {
        Self {
            directives: Vec::new(),
            error: None,
            summary,
        }
    }

    pub fn is_partial_failure(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(ExporterError::is_partial_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert_eq!(summary.dispatched, 0);
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.total_skipped(), 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.is_successful());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));
        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_export_summary_skips_and_failures() {
        let summary = ExportSummary {
            dispatched: 10,
            exported: 6,
            skipped_no_regions: 2,
            skipped_unsupported: 1,
            failed: 1,
            completions: 10,
            ..ExportSummary::default()
        };

        assert_eq!(summary.total_skipped(), 3);
        assert!(!summary.is_successful());
        summary.log_summary();
    }

    #[test]
    fn test_outcome_partial_failure() {
        let mut outcome = ExportOutcome::empty(ExportSummary::new());
        assert!(!outcome.is_partial_failure());

        outcome.error = Some(ExporterError::PartialBatchFailure {
            failures: vec!["monitor g1 (A): boom".to_string()],
        });
        assert!(outcome.is_partial_failure());
    }
}
