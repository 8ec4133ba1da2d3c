//! Error types for the Desk client.

use serde::{Deserialize, Serialize};

/// Result type for client operations.
pub type DeskResult<T> = Result<T, DeskError>;

/// Errors that can occur when talking to the Desk API.
///
/// None of the variants carry the tenant credential; messages are safe to log.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The API rejected the credential.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DeskError {
    /// Classify a non-success response.
    pub fn from_response(status: u16, body: &str, retry_after_secs: Option<u64>) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            401 | 403 => Self::Authentication(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited { retry_after_secs },
            _ => Self::Api { status, message },
        }
    }
}

/// Error body returned by the Desk API.
///
/// The API is not consistent about the field name, so both shapes are accepted.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_maps_status() {
        assert!(matches!(
            DeskError::from_response(401, r#"{"message":"bad key"}"#, None),
            DeskError::Authentication(m) if m == "bad key"
        ));
        assert!(matches!(
            DeskError::from_response(404, r#"{"error":"no such ticket"}"#, None),
            DeskError::NotFound(m) if m == "no such ticket"
        ));
        assert!(matches!(
            DeskError::from_response(429, "", Some(3)),
            DeskError::RateLimited { retry_after_secs: Some(3) }
        ));
        assert!(matches!(
            DeskError::from_response(502, "upstream down", None),
            DeskError::Api { status: 502, message } if message == "upstream down"
        ));
    }
}
