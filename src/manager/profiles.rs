//! Profile manager
//!
//! Saves capture a player into the cache and hand the store write to the
//! background. Loads are served from the cache when possible; otherwise
//! the store is read in the background and the result applied back on the
//! foreground, unless something newer happened in the meantime.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{CacheStats, ProfileCache};
use crate::config::Settings;
use crate::host::{Economy, EntityWorld, Host, PlayerState};
use crate::profile::{EntityId, GameMode, Partition, Profile, ProfileKey};
use crate::sharing::{apply_defaults, apply_profile, ApplyContext};
use crate::store::{PersistenceGateway, StoreError};

use super::tracker::{LoadTracker, LoadVerdict};
use super::ProfileError;

/// How a save was persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Store write handed to the background
    Queued,
    /// Store write completed inline (host shutting down)
    Written,
}

/// What a load did by the time it returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Applied from the cache
    Cached,
    /// Store read dispatched; applied later on the foreground
    Pending,
    /// Read inline and applied
    Loaded,
    /// Nothing stored; baseline applied inline
    Defaulted,
}

/// What a load needs to finish on the foreground
#[derive(Clone)]
struct Applier {
    settings: Arc<Settings>,
    ctx: ApplyContext,
    cache: Arc<ProfileCache>,
    economy: Option<Arc<dyn Economy>>,
}

impl Applier {
    fn apply(&self, key: &ProfileKey, profile: &Profile, player: &mut dyn PlayerState) {
        let applied = apply_profile(profile, player, &self.settings.share, &self.ctx, self.economy.as_deref());
        log::debug!("Applied {} properties from {} to {}", applied, key, player.name());
    }

    /// Apply a store result. Store errors leave the player untouched.
    fn settle(
        &self,
        key: ProfileKey,
        result: Result<Option<Profile>, StoreError>,
        player: &mut dyn PlayerState,
    ) -> Result<LoadOutcome, StoreError> {
        match result {
            Ok(Some(profile)) => {
                let profile = Arc::new(profile);
                self.apply(&key, &profile, player);
                if self.settings.cache.populate_on_load {
                    self.cache.put(key, profile);
                }
                Ok(LoadOutcome::Loaded)
            }
            Ok(None) => {
                let reset = apply_defaults(player, &self.settings.share, &self.ctx, self.economy.as_deref());
                log::debug!("No profile stored for {}; reset {} properties", key, reset);
                Ok(LoadOutcome::Defaulted)
            }
            Err(e) => {
                log::error!("Failed to load profile {}: {}", key, e);
                Err(e)
            }
        }
    }
}

/// Moves player state in and out of the store, through the cache
pub struct ProfileManager<W: EntityWorld> {
    settings: RwLock<Arc<Settings>>,
    cache: Arc<ProfileCache>,
    store: Arc<dyn PersistenceGateway>,
    host: Arc<dyn Host<W>>,
    economy: Option<Arc<dyn Economy>>,
    tracker: Arc<LoadTracker>,
}

impl<W: EntityWorld> ProfileManager<W> {
    pub fn new(settings: Settings, store: Arc<dyn PersistenceGateway>, host: Arc<dyn Host<W>>) -> Self {
        let cache = Arc::new(ProfileCache::from_settings(&settings.cache));
        log::info!(
            "Profile cache: {} entries, {:?} idle expiry",
            settings.cache.max_size,
            cache.idle_timeout()
        );

        Self {
            settings: RwLock::new(Arc::new(settings)),
            cache,
            store,
            host,
            economy: None,
            tracker: Arc::new(LoadTracker::new()),
        }
    }

    /// Route balances through `economy`
    pub fn with_economy(mut self, economy: Arc<dyn Economy>) -> Self {
        self.economy = Some(economy);
        self
    }

    /// Settings currently in effect
    pub fn settings(&self) -> Arc<Settings> {
        Arc::clone(&self.settings.read())
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Loads dispatched but not yet settled on the foreground
    pub fn loads_in_flight(&self) -> usize {
        self.tracker.in_flight()
    }

    /// Key a profile is filed under with the current settings
    pub fn key_for(&self, entity: EntityId, partition: &Partition, mode: GameMode) -> ProfileKey {
        let separate = self.settings.read().separate_game_modes;
        ProfileKey::new(entity, partition.clone(), mode, separate)
    }

    /// Capture a player and persist the snapshot.
    ///
    /// The cache is updated before returning. While the host shuts down the
    /// store write happens inline and its failure is returned.
    pub fn save(
        &self,
        world: &mut W,
        handle: W::Handle,
        partition: &Partition,
        mode: GameMode,
    ) -> Result<SaveOutcome, ProfileError> {
        let settings = self.settings();
        let player = world
            .player(handle)
            .ok_or_else(|| ProfileError::EntityMissing(format!("{:?}", handle)))?;

        let id = player.id();
        let key = ProfileKey::new(id, partition.clone(), mode, settings.separate_game_modes);
        let balance = self.economy.as_ref().map_or(0.0, |economy| economy.balance(id));
        let profile = Arc::new(Profile::capture(&*player, balance));
        let name = player.name();
        drop(player);

        self.cache.put(key.clone(), Arc::clone(&profile));
        self.tracker.record_save(&key);

        if self.host.is_shutting_down() {
            if let Err(e) = self.store.save(&key, &profile) {
                log::error!("Failed to save profile {} for {}: {}", key, name, e);
                return Err(e.into());
            }
            log::debug!("Saved profile {} for {} during shutdown", key, name);
            return Ok(SaveOutcome::Written);
        }

        let store = Arc::clone(&self.store);
        self.host.run_background(Box::new(move || {
            if let Err(e) = store.save(&key, &profile) {
                log::error!("Failed to save profile {} for {}: {}", key, name, e);
            }
        }));
        Ok(SaveOutcome::Queued)
    }

    /// Bring a player's state in line with their profile for `partition`.
    ///
    /// Must be called on the foreground. Only a cache hit or a shutdown
    /// touches the player before returning.
    pub fn load(
        &self,
        world: &mut W,
        handle: W::Handle,
        partition: &Partition,
        mode: GameMode,
    ) -> Result<LoadOutcome, ProfileError> {
        let settings = self.settings();
        let applier = Applier {
            settings: Arc::clone(&settings),
            ctx: ApplyContext {
                attribute_health: self.host.uses_attribute_health(),
            },
            cache: Arc::clone(&self.cache),
            economy: self.economy.clone(),
        };

        let mut player = world
            .player(handle)
            .ok_or_else(|| ProfileError::EntityMissing(format!("{:?}", handle)))?;
        let key = ProfileKey::new(player.id(), partition.clone(), mode, settings.separate_game_modes);

        if let Some(profile) = self.cache.get(&key) {
            self.tracker.supersede(key.entity());
            applier.apply(&key, &profile, &mut *player);
            return Ok(LoadOutcome::Cached);
        }

        let name = player.name();
        if self.host.is_shutting_down() {
            self.tracker.supersede(key.entity());
            let result = self.store.load(&key, &name);
            return applier.settle(key, result, &mut *player).map_err(Into::into);
        }
        drop(player);

        let ticket = self.tracker.begin_load(&key);
        let store = Arc::clone(&self.store);
        let host = Arc::clone(&self.host);
        let tracker = Arc::clone(&self.tracker);

        self.host.run_background(Box::new(move || {
            let result = store.load(ticket.key(), &name);

            host.run_foreground(Box::new(move |world: &mut W| {
                let verdict = tracker.finish(&ticket);
                if verdict != LoadVerdict::Current {
                    log::debug!("Discarding load of {} ({:?})", ticket.key(), verdict);
                    return;
                }

                let Some(mut player) = world.player(handle) else {
                    log::debug!("{} left before profile {} arrived", name, ticket.key());
                    return;
                };
                // Failures were logged by the applier
                let _ = applier.settle(ticket.key().clone(), result, &mut *player);
            }));
        }));

        Ok(LoadOutcome::Pending)
    }

    /// Drop every cached profile
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
        log::info!("Profile cache cleared");
    }

    /// Swap in new settings and clear the cache
    pub fn reload(&self, settings: Settings) {
        let previous = self.settings();
        if previous.cache.max_size != settings.cache.max_size
            || previous.cache.expiry_minutes != settings.cache.expiry_minutes
        {
            log::info!("Cache size and expiry changes take effect on the next start");
        }

        // Loads dispatched under the old settings must not land
        self.tracker.begin_generation();
        *self.settings.write() = Arc::new(settings);
        self.invalidate_cache();
        log::info!("Profile settings reloaded");
    }
}
