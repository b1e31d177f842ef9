//! Host collaborators
//!
//! Everything the profile core needs from the game it runs inside: a way to
//! reach live players, two execution contexts, and an optional economy.

pub mod runner;

pub use runner::TaskRunner;

use crate::profile::{EntityId, ItemStack, Location, Slots, StatusEffect};

/// Work that may run on any background thread
pub type BackgroundTask = Box<dyn FnOnce() + Send + 'static>;

/// Work that must run on the foreground context, with the world it owns
pub type ForegroundTask<W> = Box<dyn FnOnce(&mut W) + Send + 'static>;

/// Scheduling and capability queries provided by the host.
///
/// The foreground context is single-threaded and owns the entity world;
/// it is the only place players may be mutated. The background context
/// performs store I/O.
pub trait Host<W>: Send + Sync {
    fn run_background(&self, task: BackgroundTask);
    fn run_foreground(&self, task: ForegroundTask<W>);
    /// Once true, no further background dispatch may be issued
    fn is_shutting_down(&self) -> bool;
    /// Whether max health lives in an attribute rather than a plain field
    fn uses_attribute_health(&self) -> bool;
}

/// Resolves entity handles to live players on the foreground context
pub trait EntityWorld: 'static {
    type Handle: Copy + Send + std::fmt::Debug + 'static;

    /// `None` when the entity no longer exists (logged off, despawned)
    fn player(&mut self, handle: Self::Handle) -> Option<Box<dyn PlayerState + '_>>;
}

/// Read/write access to one live player's transferable state
pub trait PlayerState {
    fn id(&self) -> EntityId;
    fn name(&self) -> String;

    fn inventory(&self) -> Slots;
    fn clear_inventory(&mut self);
    fn set_inventory(&mut self, contents: &[Option<ItemStack>]);

    fn armor(&self) -> Slots;
    fn set_armor(&mut self, slots: &[Option<ItemStack>]);

    fn ender_storage(&self) -> Slots;
    fn clear_ender_storage(&mut self);
    fn set_ender_storage(&mut self, contents: &[Option<ItemStack>]);

    fn health(&self) -> f64;
    fn set_health(&mut self, health: f64);
    fn max_health(&self) -> f64;
    /// Write max health through the legacy direct field
    fn set_legacy_max_health(&mut self, max: f64);
    /// Write max health through the attribute; false if the attribute is absent
    fn set_max_health_attribute(&mut self, max: f64) -> bool;

    fn level(&self) -> u32;
    fn set_level(&mut self, level: u32);
    fn exp(&self) -> f32;
    fn set_exp(&mut self, exp: f32);
    fn total_experience(&self) -> u32;
    fn set_total_experience(&mut self, total: u32);

    fn food_level(&self) -> i32;
    fn set_food_level(&mut self, level: i32);
    fn saturation(&self) -> f32;
    fn set_saturation(&mut self, saturation: f32);
    fn exhaustion(&self) -> f32;
    fn set_exhaustion(&mut self, exhaustion: f32);

    fn fall_distance(&self) -> f32;
    fn set_fall_distance(&mut self, distance: f32);
    fn fire_ticks(&self) -> i32;
    fn set_fire_ticks(&mut self, ticks: i32);
    fn maximum_air(&self) -> i32;
    fn set_maximum_air(&mut self, air: i32);
    fn remaining_air(&self) -> i32;
    fn set_remaining_air(&mut self, air: i32);

    fn status_effects(&self) -> Vec<StatusEffect>;
    fn remove_status_effect(&mut self, kind: &str);
    fn add_status_effect(&mut self, effect: &StatusEffect);

    fn bed_spawn(&self) -> Option<Location>;
    fn set_bed_spawn(&mut self, spawn: Option<Location>);
    fn location(&self) -> Location;
    fn teleport(&mut self, to: &Location);

    /// Whether a world with this name is currently loaded
    fn world_exists(&self, world: &str) -> bool;
}

/// Monetary balances, kept outside the player object
pub trait Economy: Send + Sync {
    fn balance(&self, player: EntityId) -> f64;
    fn set_balance(&self, player: EntityId, amount: f64);
    fn reset_to_baseline(&self, player: EntityId);
}
