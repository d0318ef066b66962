//! # Transport: how requests reach the backend
//!
//! [`Transport`] is the seam between the caching client and the network. The
//! production implementation, [`HttpTransport`], uses `reqwest`:
//!
//! - on **WASM** it goes through the browser's `fetch`, adding
//!   `credentials: "include"` for endpoints that need the session cookie;
//! - on **native** targets it keeps a cookie jar for the lifetime of the client.
//!
//! Response bodies are parsed as JSON when possible; an empty body becomes `null`
//! and any other text is kept as a JSON string so error payloads are never lost.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    /// Attach cookies to the request.
    pub credentials: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.cookie_store(true);
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { client })
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        #[cfg(target_arch = "wasm32")]
        if request.credentials {
            builder = builder.fetch_credentials_include();
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Fetch(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Fetch(e.to_string()))?;

        debug!(status, url = %request.url, "response received");
        Ok(ApiResponse {
            status,
            body: parse_body(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(String::new()), Value::Null);
        assert_eq!(parse_body("  ".into()), Value::Null);
        assert_eq!(parse_body(r#"{"ok":true}"#.into()), json!({"ok": true}));
        assert_eq!(parse_body("Bad Gateway".into()), json!("Bad Gateway"));
    }

    #[test]
    fn test_success_range() {
        let ok = ApiResponse { status: 204, body: Value::Null };
        let err = ApiResponse { status: 500, body: Value::Null };
        assert!(ok.is_success());
        assert!(!err.is_success());
    }
}
