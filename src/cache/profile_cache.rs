//! Profile cache
//!
//! Bounded map from profile key to the last saved profile. Entries expire
//! after sitting unread for the configured idle time, and the least recently
//! used entry goes first when the cache is full.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::config::CacheSettings;
use crate::profile::{Profile, ProfileKey};

use super::stats::CacheStats;

struct CacheEntry {
    profile: Arc<Profile>,
    last_access: Instant,
}

impl CacheEntry {
    fn new(profile: Arc<Profile>) -> Self {
        Self {
            profile,
            last_access: Instant::now(),
        }
    }

    fn is_expired(&self, idle: Duration) -> bool {
        idle.is_zero() || self.last_access.elapsed() > idle
    }
}

struct CacheState {
    entries: LruCache<ProfileKey, CacheEntry>,
    stats: CacheStats,
}

impl CacheState {
    /// Drop expired entries from the cold end.
    ///
    /// Recency order is last-access order, so the scan stops at the first
    /// live entry.
    fn purge_expired(&mut self, idle: Duration) -> usize {
        let mut purged = 0;
        while let Some((_, entry)) = self.entries.peek_lru() {
            if !entry.is_expired(idle) {
                break;
            }
            self.entries.pop_lru();
            purged += 1;
        }
        self.stats.expirations += purged as u64;
        purged
    }
}

/// Thread-safe LRU cache of profiles with idle expiry
pub struct ProfileCache {
    state: Mutex<CacheState>,
    capacity: Option<NonZeroUsize>,
    idle: Duration,
}

impl ProfileCache {
    /// A cache holding at most `max_size` profiles (0 disables caching)
    pub fn new(max_size: usize, idle: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_size);
        let entries = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };

        Self {
            state: Mutex::new(CacheState {
                entries,
                stats: CacheStats {
                    capacity: max_size,
                    ..CacheStats::default()
                },
            }),
            capacity,
            idle,
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.max_size, settings.expiry())
    }

    /// Insert or replace a profile, restarting its idle timer
    pub fn put(&self, key: ProfileKey, profile: Arc<Profile>) {
        if self.capacity.is_none() {
            return;
        }

        let mut state = self.state.lock();
        state.purge_expired(self.idle);

        let evicted = state.entries.push(key.clone(), CacheEntry::new(profile));
        if let Some((evicted_key, _)) = evicted {
            // push hands back the old value when the key was already present
            if evicted_key != key {
                log::debug!("Profile cache full, evicted {}", evicted_key);
                state.stats.evictions += 1;
            }
        }
        state.stats.inserts += 1;
    }

    /// Look up a profile, refreshing its idle timer on a hit
    pub fn get(&self, key: &ProfileKey) -> Option<Arc<Profile>> {
        let mut state = self.state.lock();
        state.purge_expired(self.idle);

        let idle = self.idle;
        let found = match state.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(idle) => {
                entry.last_access = Instant::now();
                Some(Arc::clone(&entry.profile))
            }
            Some(_) => {
                state.entries.pop(key);
                state.stats.expirations += 1;
                None
            }
            None => None,
        };

        match found {
            Some(_) => state.stats.hits += 1,
            None => state.stats.misses += 1,
        }
        found
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        let mut state = self.state.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        log::debug!("Profile cache invalidated ({} entries dropped)", dropped);
    }

    /// Drop every idle entry now instead of waiting for the next access
    pub fn purge_expired(&self) -> usize {
        self.state.lock().purge_expired(self.idle)
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            size: state.entries.len(),
            ..state.stats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{EntityId, GameMode, Partition};
    use crate::test_support::sample_profile;
    use std::thread;

    const LONG: Duration = Duration::from_secs(3600);

    fn key(group: &str) -> ProfileKey {
        ProfileKey::new(EntityId::new_random(), Partition::group(group), GameMode::Survival, true)
    }

    #[test]
    fn test_put_then_get() {
        let cache = ProfileCache::new(10, LONG);
        let k = key("overworld");
        let profile = Arc::new(sample_profile());

        cache.put(k.clone(), Arc::clone(&profile));
        let cached = cache.get(&k).unwrap();
        assert!(Arc::ptr_eq(&cached, &profile));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_put_replaces() {
        let cache = ProfileCache::new(10, LONG);
        let k = key("overworld");
        let mut newer = sample_profile();
        newer.level = 42;

        cache.put(k.clone(), Arc::new(sample_profile()));
        cache.put(k.clone(), Arc::new(newer));
        assert_eq!(cache.get(&k).unwrap().level, 42);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ProfileCache::new(2, LONG);
        let (a, b, c) = (key("a"), key("b"), key("c"));

        cache.put(a.clone(), Arc::new(sample_profile()));
        cache.put(b.clone(), Arc::new(sample_profile()));
        // touch a so b becomes least recently used
        assert!(cache.get(&a).is_some());
        cache.put(c.clone(), Arc::new(sample_profile()));

        assert!(cache.get(&b).is_none());
        assert!(cache.get(&a).is_some());
        assert!(cache.get(&c).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_idle_entries_expire() {
        let cache = ProfileCache::new(10, Duration::from_millis(30));
        let k = key("overworld");
        cache.put(k.clone(), Arc::new(sample_profile()));

        thread::sleep(Duration::from_millis(80));
        assert!(cache.get(&k).is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_access_refreshes_idle_timer() {
        let cache = ProfileCache::new(10, Duration::from_millis(200));
        let k = key("overworld");
        cache.put(k.clone(), Arc::new(sample_profile()));

        for _ in 0..4 {
            thread::sleep(Duration::from_millis(80));
            assert!(cache.get(&k).is_some());
        }
    }

    #[test]
    fn test_purge_expired() {
        let cache = ProfileCache::new(10, Duration::from_millis(20));
        cache.put(key("a"), Arc::new(sample_profile()));
        cache.put(key("b"), Arc::new(sample_profile()));

        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = ProfileCache::new(0, LONG);
        let k = key("overworld");
        cache.put(k.clone(), Arc::new(sample_profile()));
        assert!(cache.get(&k).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let cache = ProfileCache::new(10, Duration::ZERO);
        let k = key("overworld");
        cache.put(k.clone(), Arc::new(sample_profile()));
        assert!(cache.get(&k).is_none());
    }

    #[test]
    fn test_invalidate_all() {
        let cache = ProfileCache::new(10, LONG);
        let keys: Vec<_> = (0..5).map(|i| key(&format!("group{}", i))).collect();
        for k in &keys {
            cache.put(k.clone(), Arc::new(sample_profile()));
        }

        cache.invalidate_all();
        assert!(keys.iter().all(|k| cache.get(k).is_none()));
        assert_eq!(cache.stats().misses, 5);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ProfileCache::new(64, LONG));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..50 {
                        let k = key(&format!("g{}-{}", t, i));
                        cache.put(k.clone(), Arc::new(sample_profile()));
                        let _ = cache.get(&k);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 64);
        assert_eq!(cache.stats().inserts, 200);
    }
}
