//! Profile identity and snapshots

pub mod key;
pub mod snapshot;

pub use key::{EntityId, GameMode, Partition, PartitionKind, ProfileKey};
pub use snapshot::{ItemStack, Location, Profile, Slots, StatusEffect};
