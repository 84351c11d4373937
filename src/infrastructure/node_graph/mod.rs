//! Node graph adapters

mod logging;

pub use logging::LoggingNodeGraphWriter;
