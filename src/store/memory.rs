//! In-memory profile store

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::profile::{Profile, ProfileKey};

use super::{PersistenceGateway, StoreError};

/// Profiles kept in a map for the life of the process
#[derive(Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<ProfileKey, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a stored profile without going through the gateway
    pub fn get(&self, key: &ProfileKey) -> Option<Profile> {
        self.profiles.read().get(key).cloned()
    }
}

impl PersistenceGateway for MemoryStore {
    fn load(&self, key: &ProfileKey, _name: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &ProfileKey, profile: &Profile) -> Result<(), StoreError> {
        self.profiles.write().insert(key.clone(), profile.clone());
        Ok(())
    }
}
