//! Profile snapshots
//!
//! A `Profile` is everything about a player that travels with them inside
//! one partition. It is captured once when they leave and never edited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::host::PlayerState;

/// One stack of items in a container slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type identifier, e.g. "iron_sword"
    pub item: String,
    pub amount: u32,
    /// Free-form item metadata (enchantments, custom names, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
            meta: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// Container contents, one entry per slot
pub type Slots = Vec<Option<ItemStack>>;

/// A recorded status effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Effect identifier, e.g. "poison"
    pub kind: String,
    pub duration_ticks: u32,
    pub amplifier: u8,
    #[serde(default)]
    pub ambient: bool,
}

impl StatusEffect {
    pub fn new(kind: impl Into<String>, duration_ticks: u32, amplifier: u8) -> Self {
        Self {
            kind: kind.into(),
            duration_ticks,
            amplifier,
            ambient: false,
        }
    }
}

/// A position inside a named world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Immutable snapshot of a player's transferable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub inventory: Slots,
    pub armor: Slots,
    pub ender_storage: Slots,
    pub health: f64,
    pub max_health: f64,
    pub level: u32,
    /// Progress towards the next level (0.0 - 1.0)
    pub exp: f32,
    pub total_experience: u32,
    pub food_level: i32,
    pub saturation: f32,
    pub exhaustion: f32,
    pub fall_distance: f32,
    pub fire_ticks: i32,
    pub maximum_air: i32,
    pub remaining_air: i32,
    pub status_effects: Vec<StatusEffect>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub bed_spawn: Option<Location>,
    #[serde(default)]
    pub last_location: Option<Location>,
}

impl Profile {
    /// Snapshot the live state of a player.
    ///
    /// Every property is captured regardless of which ones are shared; the
    /// share flags only gate what gets applied.
    pub fn capture(player: &dyn PlayerState, balance: f64) -> Self {
        Self {
            inventory: player.inventory(),
            armor: player.armor(),
            ender_storage: player.ender_storage(),
            health: player.health(),
            max_health: player.max_health(),
            level: player.level(),
            exp: player.exp(),
            total_experience: player.total_experience(),
            food_level: player.food_level(),
            saturation: player.saturation(),
            exhaustion: player.exhaustion(),
            fall_distance: player.fall_distance(),
            fire_ticks: player.fire_ticks(),
            maximum_air: player.maximum_air(),
            remaining_air: player.remaining_air(),
            status_effects: player.status_effects(),
            balance,
            bed_spawn: player.bed_spawn(),
            last_location: Some(player.location()),
        }
    }
}
