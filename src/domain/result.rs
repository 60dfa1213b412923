//! Result type alias for the preprocessor
//!
//! This module provides a convenient Result type alias that uses
//! `PreprocessError` as the error type.

use super::errors::PreprocessError;

/// Result type alias for preprocessor operations
///
/// # Examples
///
/// ```
/// use kml_preprocessor::domain::result::Result;
/// use kml_preprocessor::domain::errors::PreprocessError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PreprocessError::NoUsableFeatures)
/// }
/// ```
pub type Result<T> = std::result::Result<T, PreprocessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(PreprocessError::NoUsableFeatures);
        assert!(result.is_err());
    }
}
