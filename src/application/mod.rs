//! Application layer - Use cases and port interfaces
//!
//! Contains the synchronization engine, the notification bus, the poll
//! scheduler, and trait definitions for external system interactions.

pub mod bus;
pub mod engine;
mod poller;
pub mod ports;

// Re-export use cases
pub use bus::{EngineEvent, NotificationBus, PollStatus, SubscriptionId};
pub use engine::WeatherEngine;
