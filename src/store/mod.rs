//! Profile persistence
//!
//! The gateway contract the profile core relies on, plus two gateways that
//! implement it: an in-memory map and a directory of JSON files.

pub mod memory;
pub mod json_file;

pub use memory::MemoryStore;
pub use json_file::JsonFileStore;

use thiserror::Error;

use crate::profile::{Profile, ProfileKey};

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("profile version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("invalid profile key {key}: {reason}")]
    InvalidKey { key: String, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of profiles.
///
/// Both calls may be slow and are only issued from the background context,
/// except while the host shuts down.
pub trait PersistenceGateway: Send + Sync {
    /// `Ok(None)` when nothing was ever saved under this key. `name` is the
    /// player's display name, for stores that index or label by it.
    fn load(&self, key: &ProfileKey, name: &str) -> Result<Option<Profile>, StoreError>;

    fn save(&self, key: &ProfileKey, profile: &Profile) -> Result<(), StoreError>;
}
