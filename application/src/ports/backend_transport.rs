//! Backend Transport port
//!
//! Defines how use cases talk to the assistant backend: one JSON request,
//! one reply, no retries. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// HTTP verb of a backend request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the backend, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    /// Short name of the operation, used when the backend gives no reason
    /// for a failure (e.g. "execute tool")
    pub operation: &'static str,
    pub method: HttpMethod,
    /// Endpoint path relative to the configured base URL (e.g. "/chat")
    pub path: &'static str,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl BackendRequest {
    pub fn get(operation: &'static str, path: &'static str) -> Self {
        Self {
            operation,
            method: HttpMethod::Get,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST carrying `body` serialized as JSON.
    pub fn post<T: Serialize + ?Sized>(
        operation: &'static str,
        path: &'static str,
        body: &T,
    ) -> Result<Self, TransportError> {
        let body = serde_json::to_value(body).map_err(|e| TransportError::Encode {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            operation,
            method: HttpMethod::Post,
            path,
            query: Vec::new(),
            headers: Vec::new(),
            body: Some(body),
        })
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Message used when the backend rejects a request: its body verbatim, or a
/// fixed fallback when it sent nothing.
fn status_message(operation: &str, status: &u16, body: &str) -> String {
    if body.is_empty() {
        format!("{} failed (HTTP {})", operation, status)
    } else {
        body.to_string()
    }
}

/// Errors that can occur during a backend exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Non-success HTTP status. `body` is the full response text, untrimmed.
    #[error("{}", status_message(.operation, .status, .body))]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("{operation} failed: backend unreachable: {reason}")]
    Connection { operation: String, reason: String },

    #[error("{operation} failed: malformed response: {reason}")]
    Decode { operation: String, reason: String },

    #[error("{operation} failed: could not encode request: {reason}")]
    Encode { operation: String, reason: String },
}

impl TransportError {
    pub fn decode(operation: &str, reason: impl ToString) -> Self {
        TransportError::Decode {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a rejected request
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True if the backend explained the failure (non-empty body)
    pub fn has_explanation(&self) -> bool {
        self.body().is_some_and(|b| !b.is_empty())
    }

    /// HTTP 409: the write collides with existing durable state
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Port for backend exchanges
///
/// One call is one round trip. Implementations must not retry, must not
/// cache, and must report any non-success status as
/// [`TransportError::Status`] with the full body text.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Send a request and decode the JSON reply. An empty success body
    /// decodes to `null`.
    async fn exchange(&self, request: BackendRequest) -> Result<serde_json::Value, TransportError>;

    /// Send a request and return the raw success body (e.g. audio).
    async fn exchange_bytes(&self, request: BackendRequest) -> Result<Vec<u8>, TransportError>;
}
