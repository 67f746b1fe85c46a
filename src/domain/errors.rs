//! Domain error types
//!
//! This module defines the error hierarchy for zendesk-bulk.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
/// Only [`BulkError::Configuration`] is expected to reach the process boundary;
/// API errors are handled where they occur and reported per batch or per collection.
#[derive(Debug, Error)]
pub enum BulkError {
    /// Configuration-related errors (invalid operation, empty identifier list, bad config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Zendesk API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl BulkError {
    /// Returns true for errors raised before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(self, BulkError::Configuration(_))
    }
}

/// Zendesk API errors
///
/// Errors that occur when talking to the Zendesk REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Authentication or authorization failed (401/403)
    #[error("Authentication failed ({status}): {message}")]
    AuthenticationFailed { status: u16, message: String },

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded, retry after: {0}s")]
    RateLimited(u64),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The query exceeded the server's maximum result count
    #[error("Result cap exceeded: {0}")]
    ResultCapExceeded(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response could not be understood
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Maps a non-success, non-429 status to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = truncate_body(body);
        match status {
            401 | 403 => ApiError::AuthenticationFailed { status, message },
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::ClientError { status, message },
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::InvalidResponse(format!("unexpected status {status}: {message}")),
        }
    }

    /// Returns true for 401/403
    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::AuthenticationFailed { .. })
    }

    /// HTTP status associated with the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthenticationFailed { status, .. }
            | ApiError::ClientError { status, .. }
            | ApiError::ServerError { status, .. } => Some(*status),
            ApiError::RateLimited(_) => Some(429),
            ApiError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 512;
    let body = body.trim();
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

// Conversion from std::io::Error
impl From<std::io::Error> for BulkError {
    fn from(err: std::io::Error) -> Self {
        BulkError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for BulkError {
    fn from(err: serde_json::Error) -> Self {
        BulkError::Serialization(err.to_string())
    }
}

// Conversion from serde_yaml::Error
impl From<serde_yaml::Error> for BulkError {
    fn from(err: serde_yaml::Error) -> Self {
        BulkError::Configuration(format!("YAML parse error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BulkError {
    fn from(err: toml::de::Error) -> Self {
        BulkError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_bulk_error_display() {
        let err = BulkError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::Transport("connection reset".to_string());
        let err: BulkError = api_err.into();
        assert!(matches!(err, BulkError::Api(_)));
        assert!(!err.is_configuration());
    }

    #[test_case(401, true ; "unauthorized")]
    #[test_case(403, true ; "forbidden")]
    #[test_case(404, false ; "not found")]
    #[test_case(422, false ; "unprocessable")]
    #[test_case(500, false ; "server error")]
    fn test_from_status_authentication(status: u16, auth: bool) {
        assert_eq!(ApiError::from_status(status, "").is_authentication(), auth);
    }

    #[test]
    fn test_from_status_variants() {
        assert!(matches!(
            ApiError::from_status(404, "missing"),
            ApiError::NotFound(ref m) if m == "missing"
        ));
        assert!(matches!(
            ApiError::from_status(422, ""),
            ApiError::ClientError { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, ""),
            ApiError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            ApiError::from_status(302, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::RateLimited(5).status(), Some(429));
        assert_eq!(ApiError::from_status(403, "").status(), Some(403));
        assert_eq!(ApiError::Transport("x".into()).status(), None);
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "é".repeat(600);
        let err = ApiError::from_status(500, &body);
        let msg = err.to_string();
        assert!(msg.ends_with("..."));
        assert!(msg.len() < body.len());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: BulkError = io_err.into();
        assert!(matches!(err, BulkError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: BulkError = json_err.into();
        assert!(matches!(err, BulkError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: BulkError = toml_err.into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("TOML parse error"));
    }
}
