//! Realmkeep - per-partition player profiles
//!
//! Keeps a separate copy of each player's state for every world group
//! they visit. Leaving a group saves a snapshot; entering one loads the
//! matching snapshot, or resets the player when none exists.

pub mod config;
pub mod profile;
pub mod sharing;
pub mod cache;
pub mod store;
pub mod host;
pub mod ecs;
pub mod manager;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use cache::{CacheStats, ProfileCache};
pub use config::{Settings, ShareSettings};
pub use host::{Economy, EntityWorld, Host, PlayerState, TaskRunner};
pub use manager::{LoadOutcome, ProfileError, ProfileManager, SaveOutcome};
pub use profile::{EntityId, GameMode, Partition, Profile, ProfileKey};
pub use sharing::Sharable;
pub use store::{JsonFileStore, MemoryStore, PersistenceGateway, StoreError};
