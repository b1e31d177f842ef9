//! Configuration
//!
//! Settings structures and their RON loader.

pub mod settings;
pub mod loader;

pub use settings::{CacheSettings, Settings, ShareSettings};
pub use loader::ConfigError;
