//! Configuration storage adapters

mod file;

pub use file::FileConfigStore;
