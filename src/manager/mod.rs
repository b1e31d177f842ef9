//! Profile management
//!
//! Ties the cache, the store and the apply pipeline together behind
//! `save` and `load`.

pub mod profiles;
pub mod tracker;

pub use profiles::{LoadOutcome, ProfileManager, SaveOutcome};
pub use tracker::{LoadTicket, LoadTracker, LoadVerdict};

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to callers of the manager
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("entity {0} is not in the world")]
    EntityMissing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
