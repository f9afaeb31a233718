//! Transport port - object-safe HTTP boundary for the hero collection
//!
//! Paths are relative to the configured hero collection: `""` is the
//! collection itself, `"/11"` a single hero, `"/?name=man"` a search.
//! Bodies travel as `serde_json::Value`; typed decoding happens in the
//! application layer so the port stays object-safe behind `Arc<dyn ...>`.

use async_trait::async_trait;
use serde_json::Value;

use super::TransportError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransportPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;

    /// POST a JSON body. An empty success body decodes to `Value::Null`.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// PUT a JSON body. An empty success body decodes to `Value::Null`.
    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    async fn delete_json(&self, path: &str) -> Result<Value, TransportError>;
}
