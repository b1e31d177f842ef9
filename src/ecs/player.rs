//! Player entities
//!
//! Spawning, plus the `PlayerState` view the profile core uses to read and
//! write a player's components.

use std::collections::HashSet;

use hecs::{Component, Entity, World};

use crate::host::PlayerState;
use crate::profile::{EntityId, ItemStack, Location, Slots, StatusEffect};
use crate::sharing::defaults::*;

use super::components::*;

pub const INVENTORY_SLOTS: usize = 36;
pub const ARMOR_SLOTS: usize = 4;
pub const ENDER_SLOTS: usize = 27;

/// Spawn a player entity at `at` with baseline stats
pub fn spawn_player(world: &mut World, id: EntityId, name: &str, at: Location) -> Entity {
    let entity = world.spawn((
        PlayerId(id),
        Name::new(name),
        Position(at),
        Vitals::new(DEFAULT_MAX_HEALTH),
        Experience::new(),
        Hunger {
            food_level: DEFAULT_FOOD_LEVEL,
            saturation: DEFAULT_SATURATION,
            exhaustion: DEFAULT_EXHAUSTION,
        },
        Breath::new(DEFAULT_MAXIMUM_AIR),
        Hazards::default(),
    ));

    // Containers and effects added separately to keep the bundle small
    let _ = world.insert(
        entity,
        (
            InventoryComponent {
                slots: empty_slots(INVENTORY_SLOTS),
            },
            EquipmentComponent {
                armor: empty_slots(ARMOR_SLOTS),
            },
            EnderStorage {
                slots: empty_slots(ENDER_SLOTS),
            },
            StatusEffects::default(),
            BedSpawn::default(),
        ),
    );

    entity
}

/// Mutable view over one player entity
pub struct EcsPlayer<'a> {
    world: &'a mut World,
    worlds: &'a HashSet<String>,
    entity: Entity,
    id: EntityId,
}

impl<'a> EcsPlayer<'a> {
    /// `None` unless `entity` is alive and carries a `PlayerId`
    pub fn new(world: &'a mut World, worlds: &'a HashSet<String>, entity: Entity) -> Option<Self> {
        let id = world.get::<&PlayerId>(entity).ok()?.0;
        Some(Self {
            world,
            worlds,
            entity,
            id,
        })
    }

    fn read<T: Component, R: Default>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.world.get::<&T>(self.entity) {
            Ok(component) => f(&component),
            Err(_) => R::default(),
        }
    }

    /// Returns false when the entity lacks the component
    fn write<T: Component>(&self, f: impl FnOnce(&mut T)) -> bool {
        match self.world.get::<&mut T>(self.entity) {
            Ok(mut component) => {
                f(&mut component);
                true
            }
            Err(_) => false,
        }
    }
}

/// Copy `contents` into `slots`, growing the container if needed
fn fill_slots(slots: &mut Slots, contents: &[Option<ItemStack>]) {
    if slots.len() < contents.len() {
        slots.resize(contents.len(), None);
    }
    for (slot, item) in slots.iter_mut().zip(contents.iter()) {
        *slot = item.clone();
    }
}

impl PlayerState for EcsPlayer<'_> {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> String {
        self.read(|n: &Name| n.0.clone())
    }

    fn inventory(&self) -> Slots {
        self.read(|inv: &InventoryComponent| inv.slots.clone())
    }

    fn clear_inventory(&mut self) {
        self.write(|inv: &mut InventoryComponent| inv.slots.iter_mut().for_each(|s| *s = None));
    }

    fn set_inventory(&mut self, contents: &[Option<ItemStack>]) {
        self.write(|inv: &mut InventoryComponent| fill_slots(&mut inv.slots, contents));
    }

    fn armor(&self) -> Slots {
        self.read(|eq: &EquipmentComponent| eq.armor.clone())
    }

    fn set_armor(&mut self, slots: &[Option<ItemStack>]) {
        self.write(|eq: &mut EquipmentComponent| {
            eq.armor = empty_slots(ARMOR_SLOTS.max(slots.len()));
            fill_slots(&mut eq.armor, slots);
        });
    }

    fn ender_storage(&self) -> Slots {
        self.read(|chest: &EnderStorage| chest.slots.clone())
    }

    fn clear_ender_storage(&mut self) {
        self.write(|chest: &mut EnderStorage| chest.slots.iter_mut().for_each(|s| *s = None));
    }

    fn set_ender_storage(&mut self, contents: &[Option<ItemStack>]) {
        self.write(|chest: &mut EnderStorage| fill_slots(&mut chest.slots, contents));
    }

    fn health(&self) -> f64 {
        self.read(|v: &Vitals| v.health)
    }

    fn set_health(&mut self, health: f64) {
        self.write(|v: &mut Vitals| v.health = health);
    }

    fn max_health(&self) -> f64 {
        match self.world.get::<&MaxHealthAttribute>(self.entity) {
            Ok(attribute) => attribute.0,
            Err(_) => self.read(|v: &Vitals| v.max_health),
        }
    }

    fn set_legacy_max_health(&mut self, max: f64) {
        self.write(|v: &mut Vitals| v.max_health = max);
    }

    fn set_max_health_attribute(&mut self, max: f64) -> bool {
        self.write(|a: &mut MaxHealthAttribute| a.0 = max)
    }

    fn level(&self) -> u32 {
        self.read(|xp: &Experience| xp.level)
    }

    fn set_level(&mut self, level: u32) {
        self.write(|xp: &mut Experience| xp.level = level);
    }

    fn exp(&self) -> f32 {
        self.read(|xp: &Experience| xp.progress)
    }

    fn set_exp(&mut self, exp: f32) {
        self.write(|xp: &mut Experience| xp.progress = exp);
    }

    fn total_experience(&self) -> u32 {
        self.read(|xp: &Experience| xp.total)
    }

    fn set_total_experience(&mut self, total: u32) {
        self.write(|xp: &mut Experience| xp.total = total);
    }

    fn food_level(&self) -> i32 {
        self.read(|h: &Hunger| h.food_level)
    }

    fn set_food_level(&mut self, level: i32) {
        self.write(|h: &mut Hunger| h.food_level = level);
    }

    fn saturation(&self) -> f32 {
        self.read(|h: &Hunger| h.saturation)
    }

    fn set_saturation(&mut self, saturation: f32) {
        self.write(|h: &mut Hunger| h.saturation = saturation);
    }

    fn exhaustion(&self) -> f32 {
        self.read(|h: &Hunger| h.exhaustion)
    }

    fn set_exhaustion(&mut self, exhaustion: f32) {
        self.write(|h: &mut Hunger| h.exhaustion = exhaustion);
    }

    fn fall_distance(&self) -> f32 {
        self.read(|h: &Hazards| h.fall_distance)
    }

    fn set_fall_distance(&mut self, distance: f32) {
        self.write(|h: &mut Hazards| h.fall_distance = distance);
    }

    fn fire_ticks(&self) -> i32 {
        self.read(|h: &Hazards| h.fire_ticks)
    }

    fn set_fire_ticks(&mut self, ticks: i32) {
        self.write(|h: &mut Hazards| h.fire_ticks = ticks);
    }

    fn maximum_air(&self) -> i32 {
        self.read(|b: &Breath| b.maximum)
    }

    fn set_maximum_air(&mut self, air: i32) {
        self.write(|b: &mut Breath| b.maximum = air);
    }

    fn remaining_air(&self) -> i32 {
        self.read(|b: &Breath| b.remaining)
    }

    fn set_remaining_air(&mut self, air: i32) {
        self.write(|b: &mut Breath| b.remaining = air);
    }

    fn status_effects(&self) -> Vec<StatusEffect> {
        self.read(|s: &StatusEffects| s.effects.clone())
    }

    fn remove_status_effect(&mut self, kind: &str) {
        self.write(|s: &mut StatusEffects| s.remove_effect(kind));
    }

    fn add_status_effect(&mut self, effect: &StatusEffect) {
        self.write(|s: &mut StatusEffects| s.add_effect(effect.clone()));
    }

    fn bed_spawn(&self) -> Option<Location> {
        self.read(|b: &BedSpawn| b.0.clone())
    }

    fn set_bed_spawn(&mut self, spawn: Option<Location>) {
        if !self.write(|b: &mut BedSpawn| b.0 = spawn.clone()) {
            let _ = self.world.insert_one(self.entity, BedSpawn(spawn));
        }
    }

    fn location(&self) -> Location {
        match self.world.get::<&Position>(self.entity) {
            Ok(position) => position.0.clone(),
            Err(_) => Location::new("", 0.0, 0.0, 0.0),
        }
    }

    fn teleport(&mut self, to: &Location) {
        self.write(|p: &mut Position| p.0 = to.clone());
    }

    fn world_exists(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }
}
