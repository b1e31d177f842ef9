//! Realmkeep - Demo
//!
//! Runs a small scripted session: two players hop between world groups on a
//! fixed-rate loop while their profiles are saved and loaded through the
//! JSON store, then the host shuts down and flushes everything inline.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hecs::Entity;
use parking_lot::Mutex;

use realmkeep::ecs::Realm;
use realmkeep::host::{Economy, EntityWorld, Host};
use realmkeep::profile::{ItemStack, Location, StatusEffect};
use realmkeep::{EntityId, GameMode, JsonFileStore, Partition, PersistenceGateway, ProfileManager, Settings, TaskRunner};

/// Target ticks per second for the host loop
const TARGET_TPS: u64 = 20;
const TICK_TIME: Duration = Duration::from_millis(1000 / TARGET_TPS);
const SESSION_TICKS: u64 = 60;

/// Balances kept in memory for the demo
#[derive(Default)]
struct Ledger {
    balances: Mutex<HashMap<EntityId, f64>>,
}

impl Economy for Ledger {
    fn balance(&self, player: EntityId) -> f64 {
        self.balances.lock().get(&player).copied().unwrap_or(0.0)
    }

    fn set_balance(&self, player: EntityId, amount: f64) {
        self.balances.lock().insert(player, amount);
    }

    fn reset_to_baseline(&self, player: EntityId) {
        self.balances.lock().insert(player, 0.0);
    }
}

/// A player and the group they stand in
struct Traveller {
    entity: Entity,
    group: Partition,
    mode: GameMode,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Realmkeep v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "realmkeep.ron".to_string()));
    let data_dir = args.next().map(PathBuf::from).unwrap_or_else(JsonFileStore::default_root);

    let settings = Settings::load_or_default(&config_path);
    let store = Arc::new(JsonFileStore::new(&data_dir));
    log::info!("Storing profiles under {}", store.root().display());

    let runner = Arc::new(TaskRunner::<Realm>::new(2).context("starting background workers")?);
    let ledger = Arc::new(Ledger::default());
    let manager = ProfileManager::new(
        settings,
        store as Arc<dyn PersistenceGateway>,
        Arc::clone(&runner) as Arc<dyn Host<Realm>>,
    )
    .with_economy(Arc::clone(&ledger) as Arc<dyn Economy>);

    let mut realm = Realm::with_worlds(["world", "world_nether", "build"]);
    let mut travellers = vec![
        join(&mut realm, &manager, "Steve", Partition::group("survival"), GameMode::Survival)?,
        join(&mut realm, &manager, "Alex", Partition::group("creative"), GameMode::Creative)?,
    ];

    let result = run_session(&mut realm, &runner, &manager, &ledger, &mut travellers);

    // Flush every player inline before the workers go away
    runner.begin_shutdown();
    for traveller in &travellers {
        if let Err(e) = manager.save(&mut realm, traveller.entity, &traveller.group, traveller.mode) {
            log::error!("Final save failed: {}", e);
        }
    }
    runner.shutdown();

    let stats = manager.cache_stats();
    log::info!(
        "Cache: {} hits, {} misses, {:.0}% hit rate, {} entries",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0,
        stats.size
    );

    if let Err(ref e) = result {
        log::error!("Session ended with error: {}", e);
    }
    log::info!("Realmkeep shut down cleanly");
    result
}

/// Spawn a player and load their profile for the group they start in
fn join(
    realm: &mut Realm,
    manager: &ProfileManager<Realm>,
    name: &str,
    group: Partition,
    mode: GameMode,
) -> Result<Traveller> {
    let world = if group.name == "creative" { "build" } else { "world" };
    let entity = realm.spawn_player(EntityId::new_random(), name, Location::new(world, 0.0, 64.0, 0.0));
    manager.load(realm, entity, &group, mode)?;
    Ok(Traveller { entity, group, mode })
}

/// Move a traveller to another group: save where they were, load where they go
fn travel(
    realm: &mut Realm,
    manager: &ProfileManager<Realm>,
    traveller: &mut Traveller,
    group: Partition,
    mode: GameMode,
) -> Result<()> {
    manager.save(realm, traveller.entity, &traveller.group, traveller.mode)?;
    log::info!("{:?} travels {} -> {}", traveller.entity, traveller.group, group);
    manager.load(realm, traveller.entity, &group, mode)?;
    traveller.group = group;
    traveller.mode = mode;
    Ok(())
}

/// Fixed-rate host loop driving the scripted session
fn run_session(
    realm: &mut Realm,
    runner: &TaskRunner<Realm>,
    manager: &ProfileManager<Realm>,
    ledger: &Ledger,
    travellers: &mut [Traveller],
) -> Result<()> {
    for tick in 0..SESSION_TICKS {
        let tick_start = Instant::now();

        // Deliver finished loads
        runner.run_pending(realm);

        match tick {
            5 => {
                // Steve gathers some things in survival
                if let Some(mut player) = realm.player(travellers[0].entity) {
                    player.set_inventory(&[Some(ItemStack::new("iron_pickaxe", 1)), Some(ItemStack::new("cobblestone", 48))]);
                    let level = player.level();
                    player.set_level(level + 3);
                    player.add_status_effect(&StatusEffect::new("haste", 400, 0));
                    ledger.set_balance(player.id(), 35.0);
                }
            }
            20 => {
                let group = Partition::group("creative");
                travel(realm, manager, &mut travellers[0], group, GameMode::Creative)?;
            }
            30 => {
                let group = Partition::group("survival");
                travel(realm, manager, &mut travellers[1], group, GameMode::Survival)?;
            }
            40 => {
                let group = Partition::group("survival");
                travel(realm, manager, &mut travellers[0], group, GameMode::Survival)?;
            }
            _ => {}
        }

        if tick % TARGET_TPS == 0 {
            manager.cache().purge_expired();
        }

        // Tick rate limiting
        let tick_time = tick_start.elapsed();
        if tick_time < TICK_TIME {
            std::thread::sleep(TICK_TIME - tick_time);
        }
    }

    runner.run_pending(realm);

    if let Some(player) = realm.player(travellers[0].entity) {
        log::info!(
            "{} is back in survival at level {} with {} item stacks",
            player.name(),
            player.level(),
            player.inventory().iter().flatten().count()
        );
    }
    Ok(())
}
