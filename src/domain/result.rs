//! Result type alias for KSK reports

use super::errors::KskError;

/// Result type alias using `KskError` as the error type
///
/// # Examples
///
/// ```
/// use ksk_reports::domain::result::Result;
/// use ksk_reports::domain::errors::KskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KskError>;
