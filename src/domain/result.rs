//! Result type alias for roster-notify

use super::errors::RosterError;

/// Result type alias for roster-notify operations
///
/// # Examples
///
/// ```
/// use roster_notify::domain::result::Result;
/// use roster_notify::domain::errors::RosterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RosterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RosterError>;
