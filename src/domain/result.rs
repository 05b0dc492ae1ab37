//! Result type alias for Vigil
//!
//! This module provides a convenient Result type alias that uses VigilError
//! as the error type.

use super::errors::VigilError;

/// Result type alias for Vigil operations
///
/// # Examples
///
/// ```
/// use vigil::domain::result::Result;
/// use vigil::domain::errors::VigilError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VigilError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VigilError>;
