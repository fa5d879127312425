//! reqwest-backed [`BackendTransport`].
//!
//! Every exchange is one HTTP round trip. A non-success status is read to
//! the end and reported with its full body; nothing is retried.

use aios_application::{BackendConfig, BackendRequest, BackendTransport, HttpMethod, TransportError};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

/// Transport talking JSON over HTTP to the configured backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: BackendConfig,
}

impl HttpTransport {
    /// Build a transport for `config`. Fails only if the base URL is not a
    /// valid absolute URL or the HTTP client cannot be constructed.
    pub fn new(config: BackendConfig) -> Result<Self, TransportError> {
        Url::parse(&config.base_url).map_err(|e| TransportError::Connection {
            operation: "configure transport".to_string(),
            reason: format!("invalid backend URL '{}': {}", config.base_url, e),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Connection {
            operation: "configure transport".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, config })
    }

    fn url(&self, request: &BackendRequest) -> Result<Url, TransportError> {
        let endpoint = self.config.endpoint(request.path);
        let mut url = Url::parse(&endpoint).map_err(|e| TransportError::Connection {
            operation: request.operation.to_string(),
            reason: format!("invalid endpoint '{}': {}", endpoint, e),
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Send `request` and return the response if its status is a success.
    async fn send(&self, request: &BackendRequest) -> Result<Response, TransportError> {
        let url = self.url(request)?;
        debug!("{} {}", request.method, url);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            // Builder errors (e.g. an invalid header value) never reach the network.
            if e.is_builder() {
                TransportError::Encode {
                    operation: request.operation.to_string(),
                    reason: e.to_string(),
                }
            } else {
                TransportError::Connection {
                    operation: request.operation.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(|e| TransportError::Connection {
            operation: request.operation.to_string(),
            reason: format!("HTTP {} with unreadable body: {}", status.as_u16(), e),
        })?;
        warn!(
            "{} rejected with HTTP {} ({} bytes of detail)",
            request.operation,
            status.as_u16(),
            body.len()
        );
        Err(TransportError::Status {
            operation: request.operation.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn exchange(&self, request: BackendRequest) -> Result<serde_json::Value, TransportError> {
        let response = self.send(&request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::decode(request.operation, e))?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TransportError::decode(request.operation, e))
    }

    async fn exchange_bytes(&self, request: BackendRequest) -> Result<Vec<u8>, TransportError> {
        let response = self.send(&request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::decode(request.operation, e))?;
        Ok(bytes.to_vec())
    }
}
