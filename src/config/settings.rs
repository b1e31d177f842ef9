//! Settings
//!
//! Which properties travel between partitions, how game modes are keyed,
//! and how large the profile cache may grow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sharing::Sharable;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-property share toggles
    pub share: ShareSettings,
    /// Keep a separate profile per game mode
    pub separate_game_modes: bool,
    /// Profile cache sizing
    pub cache: CacheSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share: ShareSettings::default(),
            separate_game_modes: true,
            cache: CacheSettings::default(),
        }
    }
}

/// Profile cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum cached profiles (0 disables the cache)
    pub max_size: usize,
    /// Minutes an entry may sit unread before it expires
    pub expiry_minutes: u64,
    /// Put profiles read from the store on a cache miss back into the cache
    pub populate_on_load: bool,
}

impl CacheSettings {
    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_minutes.saturating_mul(60))
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_size: 1000,
            expiry_minutes: 30,
            populate_on_load: true,
        }
    }
}

/// Which properties are applied when a profile is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    pub inventory: bool,
    pub armor: bool,
    pub ender_storage: bool,
    pub health: bool,
    pub max_health: bool,
    pub level: bool,
    pub exp: bool,
    pub total_experience: bool,
    pub food_level: bool,
    pub saturation: bool,
    pub exhaustion: bool,
    pub fall_distance: bool,
    pub fire_ticks: bool,
    pub maximum_air: bool,
    pub remaining_air: bool,
    pub status_effects: bool,
    // Optional shares, off unless asked for
    pub bed_spawn: bool,
    pub last_location: bool,
}

impl ShareSettings {
    fn uniform(enabled: bool) -> Self {
        Self {
            inventory: enabled,
            armor: enabled,
            ender_storage: enabled,
            health: enabled,
            max_health: enabled,
            level: enabled,
            exp: enabled,
            total_experience: enabled,
            food_level: enabled,
            saturation: enabled,
            exhaustion: enabled,
            fall_distance: enabled,
            fire_ticks: enabled,
            maximum_air: enabled,
            remaining_air: enabled,
            status_effects: enabled,
            bed_spawn: enabled,
            last_location: enabled,
        }
    }

    /// Every property on, including the optional ones
    pub fn all() -> Self {
        Self::uniform(true)
    }

    /// Every property off
    pub fn none() -> Self {
        Self::uniform(false)
    }

    pub fn is_enabled(&self, sharable: Sharable) -> bool {
        match sharable {
            Sharable::Inventory => self.inventory,
            Sharable::Armor => self.armor,
            Sharable::EnderStorage => self.ender_storage,
            Sharable::Health => self.health,
            Sharable::MaxHealth => self.max_health,
            Sharable::Level => self.level,
            Sharable::Exp => self.exp,
            Sharable::TotalExperience => self.total_experience,
            Sharable::FoodLevel => self.food_level,
            Sharable::Saturation => self.saturation,
            Sharable::Exhaustion => self.exhaustion,
            Sharable::FallDistance => self.fall_distance,
            Sharable::FireTicks => self.fire_ticks,
            Sharable::MaximumAir => self.maximum_air,
            Sharable::RemainingAir => self.remaining_air,
            Sharable::StatusEffects => self.status_effects,
            Sharable::BedSpawn => self.bed_spawn,
            Sharable::LastLocation => self.last_location,
        }
    }

    pub fn set(&mut self, sharable: Sharable, enabled: bool) {
        let flag = match sharable {
            Sharable::Inventory => &mut self.inventory,
            Sharable::Armor => &mut self.armor,
            Sharable::EnderStorage => &mut self.ender_storage,
            Sharable::Health => &mut self.health,
            Sharable::MaxHealth => &mut self.max_health,
            Sharable::Level => &mut self.level,
            Sharable::Exp => &mut self.exp,
            Sharable::TotalExperience => &mut self.total_experience,
            Sharable::FoodLevel => &mut self.food_level,
            Sharable::Saturation => &mut self.saturation,
            Sharable::Exhaustion => &mut self.exhaustion,
            Sharable::FallDistance => &mut self.fall_distance,
            Sharable::FireTicks => &mut self.fire_ticks,
            Sharable::MaximumAir => &mut self.maximum_air,
            Sharable::RemainingAir => &mut self.remaining_air,
            Sharable::StatusEffects => &mut self.status_effects,
            Sharable::BedSpawn => &mut self.bed_spawn,
            Sharable::LastLocation => &mut self.last_location,
        };
        *flag = enabled;
    }

    /// Builder-style toggle, handy when assembling settings in code
    pub fn with(mut self, sharable: Sharable, enabled: bool) -> Self {
        self.set(sharable, enabled);
        self
    }
}

impl Default for ShareSettings {
    /// Everything except the optional shares
    fn default() -> Self {
        let mut share = Self::all();
        for sharable in Sharable::all().iter().filter(|s| s.is_optional()) {
            share.set(*sharable, false);
        }
        share
    }
}
