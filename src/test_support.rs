//! Shared fixtures for unit tests

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::host::{BackgroundTask, Economy, ForegroundTask, Host, PlayerState};
use crate::profile::{EntityId, ItemStack, Location, Profile, ProfileKey, Slots, StatusEffect};
use crate::store::{MemoryStore, PersistenceGateway, StoreError};

/// A profile with a bit of everything; all floats are exact in binary
pub fn sample_profile() -> Profile {
    Profile {
        inventory: vec![
            Some(ItemStack::new("iron_sword", 1).with_meta("enchant", "sharpness:2")),
            None,
            Some(ItemStack::new("bread", 12)),
        ],
        armor: vec![Some(ItemStack::new("iron_helmet", 1)), None, None, Some(ItemStack::new("leather_boots", 1))],
        ender_storage: vec![Some(ItemStack::new("emerald", 5))],
        health: 14.5,
        max_health: 20.0,
        level: 12,
        exp: 0.25,
        total_experience: 300,
        food_level: 17,
        saturation: 2.5,
        exhaustion: 0.5,
        fall_distance: 0.0,
        fire_ticks: 0,
        maximum_air: 300,
        remaining_air: 280,
        status_effects: vec![StatusEffect::new("speed", 600, 1)],
        balance: 42.0,
        bed_spawn: Some(Location::new("world", -12.0, 65.0, 40.0)),
        last_location: Some(Location::new("world", 100.5, 70.0, -20.25)),
    }
}

/// Plain-field player for exercising apply logic
#[derive(Debug, Clone)]
pub struct MockPlayer {
    pub id: EntityId,
    pub name: String,
    pub health: f64,
    pub max_health: f64,
    pub max_health_attribute: Option<f64>,
    pub legacy_max_health_writes: usize,
    pub level: u32,
    pub exp: f32,
    pub total_experience: u32,
    pub food_level: i32,
    pub saturation: f32,
    pub exhaustion: f32,
    pub fall_distance: f32,
    pub fire_ticks: i32,
    pub maximum_air: i32,
    pub remaining_air: i32,
    pub inventory: Slots,
    pub inventory_clears: usize,
    pub armor: Slots,
    pub ender_storage: Slots,
    pub effects: Vec<StatusEffect>,
    pub bed_spawn: Option<Location>,
    pub location: Location,
    pub worlds: HashSet<String>,
}

impl MockPlayer {
    pub fn new(name: &str) -> Self {
        Self {
            id: EntityId::new_random(),
            name: name.to_string(),
            health: 20.0,
            max_health: 20.0,
            max_health_attribute: None,
            legacy_max_health_writes: 0,
            level: 0,
            exp: 0.0,
            total_experience: 0,
            food_level: 20,
            saturation: 5.0,
            exhaustion: 0.0,
            fall_distance: 0.0,
            fire_ticks: 0,
            maximum_air: 300,
            remaining_air: 300,
            inventory: vec![None; 4],
            inventory_clears: 0,
            armor: vec![None; 4],
            ender_storage: vec![None; 4],
            effects: Vec::new(),
            bed_spawn: None,
            location: Location::new("world", 0.0, 64.0, 0.0),
            worlds: HashSet::from(["world".to_string()]),
        }
    }
}

impl PlayerState for MockPlayer {
    fn id(&self) -> EntityId {
        self.id
    }
    fn name(&self) -> String {
        self.name.clone()
    }

    fn inventory(&self) -> Slots {
        self.inventory.clone()
    }
    fn clear_inventory(&mut self) {
        self.inventory.iter_mut().for_each(|slot| *slot = None);
        self.inventory_clears += 1;
    }
    fn set_inventory(&mut self, contents: &[Option<ItemStack>]) {
        self.inventory = contents.to_vec();
    }

    fn armor(&self) -> Slots {
        self.armor.clone()
    }
    fn set_armor(&mut self, slots: &[Option<ItemStack>]) {
        self.armor = slots.to_vec();
    }

    fn ender_storage(&self) -> Slots {
        self.ender_storage.clone()
    }
    fn clear_ender_storage(&mut self) {
        self.ender_storage.iter_mut().for_each(|slot| *slot = None);
    }
    fn set_ender_storage(&mut self, contents: &[Option<ItemStack>]) {
        self.ender_storage = contents.to_vec();
    }

    fn health(&self) -> f64 {
        self.health
    }
    fn set_health(&mut self, health: f64) {
        self.health = health;
    }
    fn max_health(&self) -> f64 {
        self.max_health_attribute.unwrap_or(self.max_health)
    }
    fn set_legacy_max_health(&mut self, max: f64) {
        self.max_health = max;
        self.legacy_max_health_writes += 1;
    }
    fn set_max_health_attribute(&mut self, max: f64) -> bool {
        match self.max_health_attribute.as_mut() {
            Some(attribute) => {
                *attribute = max;
                true
            }
            None => false,
        }
    }

    fn level(&self) -> u32 {
        self.level
    }
    fn set_level(&mut self, level: u32) {
        self.level = level;
    }
    fn exp(&self) -> f32 {
        self.exp
    }
    fn set_exp(&mut self, exp: f32) {
        self.exp = exp;
    }
    fn total_experience(&self) -> u32 {
        self.total_experience
    }
    fn set_total_experience(&mut self, total: u32) {
        self.total_experience = total;
    }

    fn food_level(&self) -> i32 {
        self.food_level
    }
    fn set_food_level(&mut self, level: i32) {
        self.food_level = level;
    }
    fn saturation(&self) -> f32 {
        self.saturation
    }
    fn set_saturation(&mut self, saturation: f32) {
        self.saturation = saturation;
    }
    fn exhaustion(&self) -> f32 {
        self.exhaustion
    }
    fn set_exhaustion(&mut self, exhaustion: f32) {
        self.exhaustion = exhaustion;
    }

    fn fall_distance(&self) -> f32 {
        self.fall_distance
    }
    fn set_fall_distance(&mut self, distance: f32) {
        self.fall_distance = distance;
    }
    fn fire_ticks(&self) -> i32 {
        self.fire_ticks
    }
    fn set_fire_ticks(&mut self, ticks: i32) {
        self.fire_ticks = ticks;
    }
    fn maximum_air(&self) -> i32 {
        self.maximum_air
    }
    fn set_maximum_air(&mut self, air: i32) {
        self.maximum_air = air;
    }
    fn remaining_air(&self) -> i32 {
        self.remaining_air
    }
    fn set_remaining_air(&mut self, air: i32) {
        self.remaining_air = air;
    }

    fn status_effects(&self) -> Vec<StatusEffect> {
        self.effects.clone()
    }
    fn remove_status_effect(&mut self, kind: &str) {
        self.effects.retain(|e| e.kind != kind);
    }
    fn add_status_effect(&mut self, effect: &StatusEffect) {
        self.effects.push(effect.clone());
    }

    fn bed_spawn(&self) -> Option<Location> {
        self.bed_spawn.clone()
    }
    fn set_bed_spawn(&mut self, spawn: Option<Location>) {
        self.bed_spawn = spawn;
    }
    fn location(&self) -> Location {
        self.location.clone()
    }
    fn teleport(&mut self, to: &Location) {
        self.location = to.clone();
    }

    fn world_exists(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }
}

/// Economy that remembers every balance it was given
#[derive(Debug, Default)]
pub struct RecordingEconomy {
    balances: Mutex<HashMap<EntityId, f64>>,
}

impl RecordingEconomy {
    pub fn balance_of(&self, player: EntityId) -> Option<f64> {
        self.balances.lock().get(&player).copied()
    }
}

impl Economy for RecordingEconomy {
    fn balance(&self, player: EntityId) -> f64 {
        self.balance_of(player).unwrap_or(0.0)
    }

    fn set_balance(&self, player: EntityId, amount: f64) {
        self.balances.lock().insert(player, amount);
    }

    fn reset_to_baseline(&self, player: EntityId) {
        self.set_balance(player, 0.0);
    }
}

/// Host whose queues only move when a test steps them
pub struct ManualHost<W> {
    background: Mutex<VecDeque<BackgroundTask>>,
    foreground: Mutex<VecDeque<ForegroundTask<W>>>,
    shutting_down: AtomicBool,
    attribute_health: AtomicBool,
}

impl<W> ManualHost<W> {
    pub fn new() -> Self {
        Self {
            background: Mutex::new(VecDeque::new()),
            foreground: Mutex::new(VecDeque::new()),
            shutting_down: AtomicBool::new(false),
            attribute_health: AtomicBool::new(false),
        }
    }

    pub fn set_shutting_down(&self, value: bool) {
        self.shutting_down.store(value, Ordering::SeqCst);
    }

    pub fn set_attribute_health(&self, value: bool) {
        self.attribute_health.store(value, Ordering::SeqCst);
    }

    pub fn pending_background(&self) -> usize {
        self.background.lock().len()
    }

    pub fn pending_foreground(&self) -> usize {
        self.foreground.lock().len()
    }

    /// Run queued background work, including anything it queues in turn
    pub fn run_background_tasks(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.background.lock().pop_front();
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        ran
    }

    /// Run queued foreground work against `world`
    pub fn run_foreground_tasks(&self, world: &mut W) -> usize {
        let mut ran = 0;
        loop {
            let next = self.foreground.lock().pop_front();
            let Some(task) = next else { break };
            task(world);
            ran += 1;
        }
        ran
    }

    /// Background then foreground, the order a real host delivers results in
    pub fn settle(&self, world: &mut W) {
        self.run_background_tasks();
        self.run_foreground_tasks(world);
    }
}

impl<W> Host<W> for ManualHost<W> {
    fn run_background(&self, task: BackgroundTask) {
        self.background.lock().push_back(task);
    }

    fn run_foreground(&self, task: ForegroundTask<W>) {
        self.foreground.lock().push_back(task);
    }

    fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    fn uses_attribute_health(&self) -> bool {
        self.attribute_health.load(Ordering::SeqCst)
    }
}

/// Memory store that counts calls and can be told to fail
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_loads: AtomicBool,
    pub fail_saves: AtomicBool,
}

impl RecordingStore {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PersistenceGateway for RecordingStore {
    fn load(&self, key: &ProfileKey, name: &str) -> Result<Option<Profile>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("load refused".to_string()));
        }
        self.inner.load(key, name)
    }

    fn save(&self, key: &ProfileKey, profile: &Profile) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("save refused".to_string()));
        }
        self.inner.save(key, profile)
    }
}
