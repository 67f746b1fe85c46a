//! Result type aliases

use super::errors::{ApiError, BulkError};

/// Result type alias for zendesk-bulk operations
///
/// # Examples
///
/// ```
/// use zendesk_bulk::domain::result::Result;
/// use zendesk_bulk::domain::errors::BulkError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BulkError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BulkError>;

/// Result of a single API exchange
pub type ApiResult<T> = std::result::Result<T, ApiError>;

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
    fn test_api_result_lifts_into_result() {
        fn call() -> ApiResult<()> {
            Err(ApiError::NotFound("ticket".to_string()))
        }
        fn outer() -> Result<()> {
            call()?;
            Ok(())
        }
        assert!(matches!(outer(), Err(BulkError::Api(ApiError::NotFound(_)))));
    }
}
