//! ECS Components
//!
//! Components carried by player entities in the reference host.

use serde::{Deserialize, Serialize};

use crate::profile::{EntityId, Location, Slots, StatusEffect};

// ============================================================================
// Identity & Naming
// ============================================================================

/// Stable identity of a player entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub EntityId);

/// Name component for entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

// ============================================================================
// Vitals
// ============================================================================

/// Health pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f64,
    /// Legacy max health field
    pub max_health: f64,
}

impl Vitals {
    pub fn new(max: f64) -> Self {
        Self {
            health: max,
            max_health: max,
        }
    }
}

/// Present on hosts that model max health as an attribute.
/// Overrides `Vitals::max_health` while attached.
#[derive(Debug, Clone, Copy)]
pub struct MaxHealthAttribute(pub f64);

/// Food, saturation and exhaustion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hunger {
    pub food_level: i32,
    pub saturation: f32,
    pub exhaustion: f32,
}

/// Air supply
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Breath {
    pub maximum: i32,
    pub remaining: i32,
}

impl Breath {
    pub fn new(maximum: i32) -> Self {
        Self {
            maximum,
            remaining: maximum,
        }
    }
}

/// Environmental hazards that persist between ticks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hazards {
    pub fire_ticks: i32,
    pub fall_distance: f32,
}

// ============================================================================
// Progression
// ============================================================================

/// Experience and level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    /// Progress towards the next level (0.0 - 1.0)
    pub progress: f32,
    /// Lifetime experience points
    pub total: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Main inventory
#[derive(Debug, Clone)]
pub struct InventoryComponent {
    pub slots: Slots,
}

/// Worn armor
#[derive(Debug, Clone)]
pub struct EquipmentComponent {
    pub armor: Slots,
}

/// Personal storage chest
#[derive(Debug, Clone)]
pub struct EnderStorage {
    pub slots: Slots,
}

/// Empty container of `size` slots
pub fn empty_slots(size: usize) -> Slots {
    vec![None; size]
}

// ============================================================================
// Status Effects
// ============================================================================

/// Collection of active status effects
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Add a status effect, replacing any active effect of the same kind
    pub fn add_effect(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
        } else {
            self.effects.push(effect);
        }
    }

    /// Remove all effects of a specific kind
    pub fn remove_effect(&mut self, kind: &str) {
        self.effects.retain(|e| e.kind != kind);
    }
}

// ============================================================================
// Position
// ============================================================================

/// Where the entity currently stands
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub Location);

/// Respawn point, if one was set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BedSpawn(pub Option<Location>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_effect_replaces_same_kind() {
        let mut effects = StatusEffects::default();
        effects.add_effect(StatusEffect::new("poison", 100, 0));
        effects.add_effect(StatusEffect::new("poison", 40, 2));
        effects.add_effect(StatusEffect::new("speed", 200, 1));

        assert_eq!(effects.effects.len(), 2);
        assert_eq!(effects.effects[0].amplifier, 2);

        effects.remove_effect("poison");
        let kinds: Vec<&str> = effects.effects.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, ["speed"]);
    }
}
