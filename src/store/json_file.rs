//! JSON file profile store
//!
//! One pretty-printed JSON document per profile key:
//! `<root>/<worlds|groups>/<partition>/<entity>/<mode>.json`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::profile::{EntityId, Profile, ProfileKey};

use super::{PersistenceGateway, StoreError};

/// Profile file version for compatibility checking
const PROFILE_VERSION: u32 = 1;

/// On-disk envelope, written side
#[derive(Serialize)]
struct StoredProfileOut<'a> {
    version: u32,
    entity: EntityId,
    partition: &'a str,
    mode: &'a str,
    profile: &'a Profile,
}

/// On-disk envelope, read side
#[derive(Deserialize)]
struct StoredProfile {
    version: u32,
    profile: Profile,
}

/// Profiles stored as JSON files under a root directory
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform data directory for profiles
    pub fn default_root() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "realmkeep", "Realmkeep") {
            let mut path = proj_dirs.data_local_dir().to_path_buf();
            path.push("profiles");
            path
        } else {
            // Fallback to current directory
            PathBuf::from("./profiles")
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the profile for `key`
    pub fn path_for(&self, key: &ProfileKey) -> Result<PathBuf, StoreError> {
        let partition = key.partition();
        validate_segment(key, &partition.name)?;

        let mut path = self.root.clone();
        path.push(partition.kind.dir_name());
        path.push(&partition.name);
        path.push(key.entity().to_string());
        path.push(format!("{}.json", key.mode_name()));
        Ok(path)
    }

    /// Remove a stored profile; removing a missing one is not an error
    pub fn delete(&self, key: &ProfileKey) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            log::info!("Deleted profile {}", key);
        }
        Ok(())
    }
}

impl PersistenceGateway for JsonFileStore {
    fn load(&self, key: &ProfileKey, name: &str) -> Result<Option<Profile>, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        let stored: StoredProfile = serde_json::from_str(&data)?;

        // Version check
        if stored.version != PROFILE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: PROFILE_VERSION,
                found: stored.version,
            });
        }

        log::debug!("Loaded profile {} for {}", key, name);
        Ok(Some(stored.profile))
    }

    fn save(&self, key: &ProfileKey, profile: &Profile) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let dir = path.parent().unwrap_or(self.root.as_path());
        fs::create_dir_all(dir)?;

        let stored = StoredProfileOut {
            version: PROFILE_VERSION,
            entity: key.entity(),
            partition: &key.partition().name,
            mode: key.mode_name(),
            profile,
        };
        let json = serde_json::to_string_pretty(&stored)?;

        // Write beside the target, then rename over it
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        log::debug!("Saved profile {}", key);
        Ok(())
    }
}

/// Characters some filesystems refuse in file names
const RESERVED_CHARS: [char; 8] = ['\0', ':', '*', '?', '"', '<', '>', '|'];

fn validate_segment(key: &ProfileKey, name: &str) -> Result<(), StoreError> {
    let reason = if name.is_empty() {
        Some("partition name is empty")
    } else if name.contains(['/', '\\']) {
        Some("partition name contains a path separator")
    } else if name.contains(RESERVED_CHARS) {
        Some("partition name contains a reserved character")
    } else if name.starts_with('.') {
        Some("partition name starts with '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
