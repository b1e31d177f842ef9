//! Property registry
//!
//! One record per sharable: which phase it belongs to, how to copy it from a
//! profile onto a player, and how to reset it to baseline. The table is kept
//! in apply order, so both the profile and the defaults path just walk it.

use crate::host::PlayerState;
use crate::profile::Profile;

use super::defaults::*;
use super::sharable::{Phase, Sharable};

/// Per-apply facts about the host
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyContext {
    /// Write max health through the attribute instead of the legacy field
    pub attribute_health: bool,
}

pub type ApplyFn = fn(&Profile, &mut dyn PlayerState, &ApplyContext);
pub type ResetFn = fn(&mut dyn PlayerState, &ApplyContext);

/// Registry record for one sharable
pub struct SharableDef {
    pub sharable: Sharable,
    pub phase: Phase,
    pub apply: ApplyFn,
    pub reset: ResetFn,
}

/// All sharables in apply order.
///
/// Max health must stay ahead of health: the health clamp reads the max the
/// player has after this apply.
pub static REGISTRY: [SharableDef; 18] = [
    // Scalars
    SharableDef {
        sharable: Sharable::Level,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_level(p.level),
        reset: |player, _| player.set_level(DEFAULT_LEVEL),
    },
    SharableDef {
        sharable: Sharable::Exp,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_exp(p.exp),
        reset: |player, _| player.set_exp(DEFAULT_EXP),
    },
    SharableDef {
        sharable: Sharable::TotalExperience,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_total_experience(p.total_experience),
        reset: |player, _| player.set_total_experience(DEFAULT_TOTAL_EXPERIENCE),
    },
    SharableDef {
        sharable: Sharable::FoodLevel,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_food_level(p.food_level),
        reset: |player, _| player.set_food_level(DEFAULT_FOOD_LEVEL),
    },
    SharableDef {
        sharable: Sharable::Saturation,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_saturation(p.saturation),
        reset: |player, _| player.set_saturation(DEFAULT_SATURATION),
    },
    SharableDef {
        sharable: Sharable::Exhaustion,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_exhaustion(p.exhaustion),
        reset: |player, _| player.set_exhaustion(DEFAULT_EXHAUSTION),
    },
    SharableDef {
        sharable: Sharable::FallDistance,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_fall_distance(p.fall_distance),
        reset: |player, _| player.set_fall_distance(DEFAULT_FALL_DISTANCE),
    },
    SharableDef {
        sharable: Sharable::FireTicks,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_fire_ticks(p.fire_ticks),
        reset: |player, _| player.set_fire_ticks(DEFAULT_FIRE_TICKS),
    },
    SharableDef {
        sharable: Sharable::MaximumAir,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_maximum_air(p.maximum_air),
        reset: |player, _| player.set_maximum_air(DEFAULT_MAXIMUM_AIR),
    },
    SharableDef {
        sharable: Sharable::RemainingAir,
        phase: Phase::Scalars,
        apply: |p, player, _| player.set_remaining_air(p.remaining_air),
        reset: |player, _| player.set_remaining_air(DEFAULT_REMAINING_AIR),
    },
    // Containers
    SharableDef {
        sharable: Sharable::Inventory,
        phase: Phase::Containers,
        apply: |p, player, _| {
            player.clear_inventory();
            player.set_inventory(&p.inventory);
        },
        reset: |player, _| player.clear_inventory(),
    },
    SharableDef {
        sharable: Sharable::Armor,
        phase: Phase::Containers,
        apply: |p, player, _| player.set_armor(&p.armor),
        reset: |player, _| player.set_armor(&[]),
    },
    SharableDef {
        sharable: Sharable::EnderStorage,
        phase: Phase::Containers,
        apply: |p, player, _| {
            player.clear_ender_storage();
            player.set_ender_storage(&p.ender_storage);
        },
        reset: |player, _| player.clear_ender_storage(),
    },
    // Health
    SharableDef {
        sharable: Sharable::MaxHealth,
        phase: Phase::Health,
        apply: |p, player, ctx| write_max_health(player, p.max_health, ctx),
        reset: |player, ctx| write_max_health(player, DEFAULT_MAX_HEALTH, ctx),
    },
    SharableDef {
        sharable: Sharable::Health,
        phase: Phase::Health,
        apply: |p, player, _| write_health(player, p.health),
        reset: |player, _| write_health(player, DEFAULT_HEALTH),
    },
    // Effects
    SharableDef {
        sharable: Sharable::StatusEffects,
        phase: Phase::Effects,
        apply: |p, player, _| {
            remove_all_effects(player);
            for effect in &p.status_effects {
                player.add_status_effect(effect);
            }
        },
        reset: |player, _| remove_all_effects(player),
    },
    // Locations
    SharableDef {
        sharable: Sharable::BedSpawn,
        phase: Phase::Locations,
        apply: |p, player, _| match &p.bed_spawn {
            Some(spawn) if !player.world_exists(&spawn.world) => {
                log::warn!(
                    "Bed spawn for {} is in missing world '{}'; leaving it unchanged",
                    player.name(),
                    spawn.world
                );
            }
            spawn => player.set_bed_spawn(spawn.clone()),
        },
        reset: |player, _| player.set_bed_spawn(None),
    },
    SharableDef {
        sharable: Sharable::LastLocation,
        phase: Phase::Locations,
        apply: |p, player, _| {
            let Some(location) = &p.last_location else {
                return;
            };
            if player.world_exists(&location.world) {
                player.teleport(location);
            } else {
                log::warn!(
                    "Last location for {} is in missing world '{}'; not teleporting",
                    player.name(),
                    location.world
                );
            }
        },
        // No baseline position; the host decides where a fresh player stands
        reset: |_, _| {},
    },
];

/// Find the record for a sharable
pub fn lookup(sharable: Sharable) -> Option<&'static SharableDef> {
    REGISTRY.iter().find(|def| def.sharable == sharable)
}

/// Health is clamped into (0, max]; anything outside becomes max
pub fn clamp_health(health: f64, max: f64) -> f64 {
    if health > 0.0 && health <= max {
        health
    } else {
        max
    }
}

fn write_max_health(player: &mut dyn PlayerState, max: f64, ctx: &ApplyContext) {
    if ctx.attribute_health {
        if player.set_max_health_attribute(max) {
            return;
        }
        log::warn!(
            "{} has no max health attribute; falling back to the legacy field",
            player.name()
        );
    }
    player.set_legacy_max_health(max);
}

fn write_health(player: &mut dyn PlayerState, health: f64) {
    let max = player.max_health();
    player.set_health(clamp_health(health, max));
}

fn remove_all_effects(player: &mut dyn PlayerState) {
    for effect in player.status_effects() {
        player.remove_status_effect(&effect.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_sharable_registered_once() {
        let registered: HashSet<Sharable> = REGISTRY.iter().map(|d| d.sharable).collect();
        assert_eq!(registered.len(), REGISTRY.len());
        for sharable in Sharable::all() {
            assert!(registered.contains(sharable), "{:?} missing", sharable);
            assert_eq!(lookup(*sharable).map(|d| d.sharable), Some(*sharable));
        }
    }

    #[test]
    fn test_registry_in_phase_order() {
        assert!(REGISTRY.windows(2).all(|w| w[0].phase <= w[1].phase));

        let position = |s: Sharable| REGISTRY.iter().position(|d| d.sharable == s).unwrap();
        assert!(position(Sharable::MaxHealth) < position(Sharable::Health));
    }

    #[test]
    fn test_clamp_health() {
        assert_eq!(clamp_health(0.0, 20.0), 20.0);
        assert_eq!(clamp_health(15.0, 20.0), 15.0);
        assert_eq!(clamp_health(25.0, 20.0), 20.0);
        assert_eq!(clamp_health(-3.0, 20.0), 20.0);
        assert_eq!(clamp_health(20.0, 20.0), 20.0);
        assert_eq!(clamp_health(f64::NAN, 20.0), 20.0);
    }
}
