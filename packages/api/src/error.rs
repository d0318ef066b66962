//! Errors surfaced by backend calls.
//!
//! Transport failures and server error payloads are reported as they are; nothing
//! here decides whether a failure is worth retrying.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}")]
    Http { status: u16, body: Value },
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Fetch(String),
    /// The response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// The request could not be built.
    #[error("Invalid request: {0}")]
    Request(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user: the server's `message` field when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { body, .. } => body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| self.to_string()),
            other => other.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for ApiError {
    fn from(e: config::ConfigError) -> Self {
        ApiError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Http {
            status: 401,
            body: json!({"message": "Invalid email or password"}),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = ApiError::Http { status: 500, body: Value::Null };
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = ApiError::Fetch("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Network error: connection refused");
    }
}
