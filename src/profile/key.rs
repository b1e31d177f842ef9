//! Profile keys
//!
//! A profile is addressed by who owns it, which partition it belongs to,
//! and (optionally) which game mode it was recorded in.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable unique identity of a player entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a fresh random id
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a partition is a single world or a named group of worlds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionKind {
    World,
    Group,
}

impl PartitionKind {
    /// Directory-friendly plural name
    pub fn dir_name(&self) -> &'static str {
        match self {
            PartitionKind::World => "worlds",
            PartitionKind::Group => "groups",
        }
    }
}

/// A profile namespace shared by one or more worlds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    pub kind: PartitionKind,
    pub name: String,
}

impl Partition {
    pub fn world(name: impl Into<String>) -> Self {
        Self { kind: PartitionKind::World, name: name.into() }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self { kind: PartitionKind::Group, name: name.into() }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PartitionKind::World => write!(f, "world:{}", self.name),
            PartitionKind::Group => write!(f, "group:{}", self.name),
        }
    }
}

/// Game mode a player is in when a profile is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }
}

/// Composite cache/store key for one profile.
///
/// Built once per operation through [`ProfileKey::new`], which folds the
/// game mode away when modes share a profile. Two keys built from different
/// modes under that setting compare equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileKey {
    entity: EntityId,
    partition: Partition,
    mode: Option<GameMode>,
}

impl ProfileKey {
    pub fn new(entity: EntityId, partition: Partition, mode: GameMode, separate_modes: bool) -> Self {
        Self {
            entity,
            partition,
            mode: separate_modes.then_some(mode),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// `None` when the key is shared across all game modes
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Mode component as used in file names and logs
    pub fn mode_name(&self) -> &'static str {
        self.mode.map(|m| m.name()).unwrap_or("shared")
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.partition, self.entity, self.mode_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_modes_collapse_when_shared() {
        let id = EntityId::new_random();
        let a = ProfileKey::new(id, Partition::group("overworld"), GameMode::Survival, false);
        let b = ProfileKey::new(id, Partition::group("overworld"), GameMode::Creative, false);
        assert_eq!(a, b);
        assert_eq!(a.mode(), None);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_modes_separate_when_enabled() {
        let id = EntityId::new_random();
        let a = ProfileKey::new(id, Partition::group("overworld"), GameMode::Survival, true);
        let b = ProfileKey::new(id, Partition::group("overworld"), GameMode::Creative, true);
        assert_ne!(a, b);
        assert_eq!(b.mode_name(), "creative");
    }

    #[test]
    fn test_partition_kind_is_part_of_identity() {
        let id = EntityId::new_random();
        let world = ProfileKey::new(id, Partition::world("nether"), GameMode::Survival, true);
        let group = ProfileKey::new(id, Partition::group("nether"), GameMode::Survival, true);
        assert_ne!(world, group);
    }
}
