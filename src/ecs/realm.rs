//! Reference entity world
//!
//! A hecs world plus the set of loaded world names, exposed to the profile
//! core through `EntityWorld`.

use std::collections::HashSet;

use hecs::{Entity, World};

use crate::host::{EntityWorld, PlayerState};
use crate::profile::{EntityId, Location};

use super::components::PlayerId;
use super::player::{spawn_player, EcsPlayer};

/// All live entities and the worlds they can stand in
#[derive(Default)]
pub struct Realm {
    pub world: World,
    worlds: HashSet<String>,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Realm with the given worlds already loaded
    pub fn with_worlds<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            world: World::new(),
            worlds: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn load_world(&mut self, name: impl Into<String>) {
        self.worlds.insert(name.into());
    }

    pub fn unload_world(&mut self, name: &str) -> bool {
        self.worlds.remove(name)
    }

    pub fn has_world(&self, name: &str) -> bool {
        self.worlds.contains(name)
    }

    pub fn spawn_player(&mut self, id: EntityId, name: &str, at: Location) -> Entity {
        if !self.worlds.contains(&at.world) {
            log::warn!("Spawning {} in unloaded world '{}'", name, at.world);
        }
        spawn_player(&mut self.world, id, name, at)
    }

    /// Remove an entity; false if it was already gone
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity).is_ok()
    }

    pub fn find_player(&self, id: EntityId) -> Option<Entity> {
        self.world
            .query::<&PlayerId>()
            .iter()
            .find(|(_, player)| player.0 == id)
            .map(|(entity, _)| entity)
    }

    pub fn player_count(&self) -> usize {
        self.world.query::<&PlayerId>().iter().count()
    }
}

impl EntityWorld for Realm {
    type Handle = Entity;

    fn player(&mut self, handle: Entity) -> Option<Box<dyn PlayerState + '_>> {
        let player = EcsPlayer::new(&mut self.world, &self.worlds, handle)?;
        Some(Box::new(player))
    }
}
