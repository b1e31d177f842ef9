//! Sharable properties
//!
//! The fixed set of player properties a profile can carry between partitions.

use serde::{Deserialize, Serialize};

/// A transferable player property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sharable {
    Inventory,
    Armor,
    EnderStorage,
    Health,
    MaxHealth,
    Level,
    Exp,
    TotalExperience,
    FoodLevel,
    Saturation,
    Exhaustion,
    FallDistance,
    FireTicks,
    MaximumAir,
    RemainingAir,
    StatusEffects,
    BedSpawn,
    LastLocation,
}

/// Apply phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Scalars,
    Containers,
    Health,
    Effects,
    Locations,
}

impl Sharable {
    /// Config-style name
    pub fn name(&self) -> &'static str {
        match self {
            Sharable::Inventory => "inventory",
            Sharable::Armor => "armor",
            Sharable::EnderStorage => "ender_storage",
            Sharable::Health => "health",
            Sharable::MaxHealth => "max_health",
            Sharable::Level => "level",
            Sharable::Exp => "exp",
            Sharable::TotalExperience => "total_experience",
            Sharable::FoodLevel => "food_level",
            Sharable::Saturation => "saturation",
            Sharable::Exhaustion => "exhaustion",
            Sharable::FallDistance => "fall_distance",
            Sharable::FireTicks => "fire_ticks",
            Sharable::MaximumAir => "maximum_air",
            Sharable::RemainingAir => "remaining_air",
            Sharable::StatusEffects => "status_effects",
            Sharable::BedSpawn => "bed_spawn",
            Sharable::LastLocation => "last_location",
        }
    }

    /// Look up a sharable by its config name
    pub fn from_name(name: &str) -> Option<Sharable> {
        Self::all().iter().copied().find(|s| s.name() == name)
    }

    /// Optional shares are off in the default configuration
    pub fn is_optional(&self) -> bool {
        matches!(self, Sharable::BedSpawn | Sharable::LastLocation)
    }

    /// All sharables
    pub fn all() -> &'static [Sharable] {
        &[
            Sharable::Inventory,
            Sharable::Armor,
            Sharable::EnderStorage,
            Sharable::Health,
            Sharable::MaxHealth,
            Sharable::Level,
            Sharable::Exp,
            Sharable::TotalExperience,
            Sharable::FoodLevel,
            Sharable::Saturation,
            Sharable::Exhaustion,
            Sharable::FallDistance,
            Sharable::FireTicks,
            Sharable::MaximumAir,
            Sharable::RemainingAir,
            Sharable::StatusEffects,
            Sharable::BedSpawn,
            Sharable::LastLocation,
        ]
    }
}
