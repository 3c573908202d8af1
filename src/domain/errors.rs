//! Domain error types
//!
//! This module defines the error hierarchy for tfsynth. Errors are
//! domain-specific and don't expose third-party types: transport and decode
//! failures from the HTTP client are converted to [`RemoteQueryError`] at the
//! adapter boundary.

use thiserror::Error;

/// Header line of the aggregate error returned by a run with failures
pub const PARTIAL_FAILURE_HEADER: &str = "the following errors occurred exporting monitors";

/// Main tfsynth error type
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure talking to the NerdGraph collaborator
    #[error("Remote query error: {0}")]
    RemoteQuery(#[from] RemoteQueryError),

    /// Failure persisting a rendered document
    #[error("Render write error: {0}")]
    RenderWrite(#[from] RenderWriteError),

    /// One or more monitors failed during a batch export
    ///
    /// `failures` holds one line per failed monitor, in the order the
    /// failures were received by the error collector.
    #[error("{}", partial_failure_message(.failures))]
    PartialBatchFailure { failures: Vec<String> },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors outside of document rendering
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExporterError {
    /// Whether this is the aggregate error of a partially failed run
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, ExporterError::PartialBatchFailure { .. })
    }
}

fn partial_failure_message(failures: &[String]) -> String {
    let mut message = String::from(PARTIAL_FAILURE_HEADER);
    for failure in failures {
        message.push('\n');
        message.push_str(failure);
    }
    message
}

/// NerdGraph query errors
///
/// Raised on transport failures, non-success HTTP statuses, GraphQL error
/// payloads, and responses that don't decode into the expected envelope.
#[derive(Debug, Error)]
pub enum RemoteQueryError {
    /// The request never produced a response
    #[error("Failed to reach NerdGraph: {0}")]
    ConnectionFailed(String),

    /// The server answered with a non-success status
    #[error("NerdGraph returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The response carried a GraphQL `errors` array
    #[error("NerdGraph query failed: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body didn't match the expected shape
    #[error("Invalid NerdGraph response: {0}")]
    InvalidResponse(String),
}

/// Local persistence failure while writing a rendered document
#[derive(Debug, Error)]
#[error("failed to write {path}: {message}")]
pub struct RenderWriteError {
    /// Target path of the document
    pub path: String,
    /// Underlying error message
    pub message: String,
}

impl RenderWriteError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}
