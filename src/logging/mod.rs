//! Logging and observability
//!
//! Structured logging through `tracing`, with a console layer and an
//! optional JSON file layer. The macros below give per-monitor events a
//! uniform set of fields.
//!
//! # Example
//!
//! ```no_run
//! use tfsynth::config::LoggingConfig;
//! use tfsynth::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(monitors = 12, "Export started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a monitor that was not exported
///
/// # Example
///
/// ```no_run
/// use tfsynth::log_monitor_skipped;
///
/// log_monitor_skipped!("MXxTWU5USHx...", "Login Check", "unsupported monitor type");
/// ```
#[macro_export]
macro_rules! log_monitor_skipped {
    ($guid:expr, $name:expr, $reason:expr) => {
        tracing::info!(
            monitor_guid = %$guid,
            monitor_name = %$name,
            reason = %$reason,
            "Skipping monitor"
        );
    };
}

/// Log a monitor whose export failed
///
/// # Example
///
/// ```no_run
/// use tfsynth::log_monitor_failed;
///
/// log_monitor_failed!("MXxTWU5USHx...", "Login Check", "connection reset");
/// ```
#[macro_export]
macro_rules! log_monitor_failed {
    ($guid:expr, $name:expr, $error:expr) => {
        tracing::error!(
            monitor_guid = %$guid,
            monitor_name = %$name,
            error = %$error,
            "Failed to export monitor"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        crate::log_monitor_skipped!("g1", "Login Check", "no mapped public locations");
        crate::log_monitor_failed!("g1", "Login Check", "boom");
    }
}
