//! Result type alias for tfsynth

use super::errors::ExporterError;

/// Result type alias for tfsynth operations
///
/// # Examples
///
/// ```
/// use tfsynth::domain::result::Result;
/// use tfsynth::domain::errors::ExporterError;
///
/// fn failing_function() -> Result<()> {
///     Err(ExporterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExporterError>;
