//! HTTP transport for the hero API (reqwest)

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use crate::ports::{TransportError, TransportPort};

/// Default hero collection URL.
pub const DEFAULT_HEROES_API_URL: &str = "http://localhost:3000/api/heroes";

/// Transport that talks to a REST hero collection over HTTP.
///
/// No timeout and no retry policy are configured; a call lasts as long as
/// the server takes to answer.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a transport around an existing client (shared connection pool).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, url: String, request: RequestBuilder) -> Result<Value, TransportError> {
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::status(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::request(&url, e))?;

        // 204 and friends carry no body
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| TransportError::decode(url, e))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_HEROES_API_URL)
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(method = "GET", url = %url, "hero api request");
        let request = self.client.get(&url);
        self.send(url, request).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(method = "POST", url = %url, "hero api request");
        let request = self.client.post(&url).json(body);
        self.send(url, request).await
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(method = "PUT", url = %url, "hero api request");
        let request = self.client.put(&url).json(body);
        self.send(url, request).await
    }

    async fn delete_json(&self, path: &str) -> Result<Value, TransportError> {
        let url = self.url(path);
        tracing::debug!(method = "DELETE", url = %url, "hero api request");
        let request = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, "application/json");
        self.send(url, request).await
    }
}
