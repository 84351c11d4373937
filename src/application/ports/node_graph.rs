//! Node graph writer port interface

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Node graph write errors
#[derive(Debug, Clone, Error)]
pub enum NodeGraphError {
    #[error("Property write failed: {0}")]
    WriteFailed(String),
}

/// Port for the render engine's node graph.
///
/// Writes are best-effort: the engine logs failures and never retries or
/// treats them as fetch failures.
#[async_trait]
pub trait NodeGraphWriter: Send + Sync {
    /// Set a single property on a node.
    async fn set_property(
        &self,
        node_path: &str,
        property_path: &str,
        value: Value,
    ) -> Result<(), NodeGraphError>;
}
