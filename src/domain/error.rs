//! Domain error types

use thiserror::Error;

/// Error when an out-of-range favorite slot is addressed
#[derive(Debug, Clone, Error)]
#[error("Invalid favorite slot {slot}. Valid slots are 1 to 4")]
pub struct InvalidSlotError {
    pub slot: u8,
}

/// Error when an out-of-range override preset id is selected
#[derive(Debug, Clone, Error)]
#[error("Invalid override preset {preset}. Valid presets are 1 to 7")]
pub struct InvalidPresetError {
    pub preset: u8,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
