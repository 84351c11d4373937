//! Weather Control - weather state synchronization for broadcast graphics
//!
//! This crate keeps a render engine's weather-related node properties in
//! sync with either live provider data or an operator-selected override
//! preset, and persists operator preferences across restarts.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Configuration and snapshot value objects, override
//!   resolution, and errors
//! - **Application**: The synchronization engine, poll scheduler,
//!   notification bus, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (OpenWeather client,
//!   TOML config store, node graph writer)
//! - **CLI**: Argument parsing and the application runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
