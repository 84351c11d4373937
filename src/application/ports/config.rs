//! Configuration storage port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::WeatherConfig;
use crate::domain::error::ConfigError;

/// Port for durable configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// Returns defaults if no config exists yet.
    async fn load(&self) -> Result<WeatherConfig, ConfigError>;

    /// Save configuration to storage.
    async fn save(&self, config: &WeatherConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if a configuration file exists.
    fn exists(&self) -> bool;

    /// Initialize the configuration file with defaults.
    /// Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
