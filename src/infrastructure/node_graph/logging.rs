//! Logging node graph adapter
//!
//! Stand-in for the render engine transport: records every property write
//! at debug level so linked-mode output stays observable without a hub
//! connection.

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{NodeGraphError, NodeGraphWriter};

pub struct LoggingNodeGraphWriter;

impl LoggingNodeGraphWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingNodeGraphWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeGraphWriter for LoggingNodeGraphWriter {
    async fn set_property(
        &self,
        node_path: &str,
        property_path: &str,
        value: Value,
    ) -> Result<(), NodeGraphError> {
        log::debug!("setProperty {node_path}:{property_path} = {value}");
        Ok(())
    }
}
