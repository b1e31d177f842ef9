//! Entity Component System module
//!
//! A reference host world built on hecs: player components, the
//! `PlayerState` view over them, and the realm that owns them.

pub mod components;
pub mod player;
pub mod realm;

pub use components::*;
pub use player::{spawn_player, EcsPlayer};
pub use realm::Realm;
