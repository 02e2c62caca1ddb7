//! Nightwatch Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: восприятие и поведение охраны.
//!
//! - VisionProbe (FOV + line of sight) → `vision`
//! - Patrol (waypoints / roam) → `patrol`
//! - Pursuit FSM (Patrol → Chase → Return) и Sentry FSM (Sweep ⇄ Track + Alert) → `ai`
//! - Disruption lifecycle (урон, freeze, disable, смерть) → `disruption`
//!
//! Мир (occluders, тела) читается через `spatial::WorldQuery`; рендер, ввод,
//! двери и прочее - коллабораторы, получающие события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::marker::PhantomData;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod disruption;
pub mod error;
pub mod layers;
pub mod logger;
pub mod patrol;
pub mod spatial;
pub mod spawn;
pub mod timer;
pub mod vision;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AlarmTriggered, PursuitAgent, PursuitChanged, PursuitState, Sentry, SentryState};
pub use combat::{CombatPlugin, ContactDamage, ContactHit};
pub use components::*;
pub use config::{PatrolRouteConfig, SpawnConfig};
pub use disruption::{
    Damageable, Dead, DespawnAfter, Disruption, DisruptionEvent, DisruptionIntent, DisruptionPlugin,
};
pub use error::{ConfigError, ConfigResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use patrol::{PatrolMover, PatrolRoute};
pub use spatial::{Candidate, RayHit, StaticWorld, StaticWorldPlugin, WorldQuery};
pub use spawn::{guard_bundle, sentry_bundle, spawn_guard, spawn_sentry, SpawnKind, SpawnPoint, SpawnTable};
pub use timer::DeferredTimer;
pub use vision::{can_see, compute_visible_target, line_of_sight, LineOfSightTest, Perceiver, ViewCone};

/// Фазы симуляции
///
/// Update (chain): Disruption → WorldSync → Perception → Cleanup
/// FixedUpdate (chain): Movement → Contact
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Intents + re-enable таймеры
    Disruption,
    /// Снапшот тел для world-запросов
    WorldSync,
    /// VisionProbe + FSM
    Perception,
    /// Деспавн мёртвых
    Cleanup,
    /// Единственный writer Position
    Movement,
    /// Контактный урон (после движения)
    Contact,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// `W` - реализация world-запросов. Для `StaticWorld` дополнительно
/// добавьте `StaticWorldPlugin` (sync тел каждый тик).
pub struct SimulationPlugin<W> {
    _world: PhantomData<fn() -> W>,
}

impl<W> Default for SimulationPlugin<W> {
    fn default() -> Self {
        Self {
            _world: PhantomData,
        }
    }
}

impl<W: WorldQuery + Resource> Plugin for SimulationPlugin<W> {
    fn build(&self, app: &mut App) {
        // Seed задаёт host (create_headless_app); здесь только fallback
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            Update,
            (
                SimulationSet::Disruption,
                SimulationSet::WorldSync,
                SimulationSet::Perception,
                SimulationSet::Cleanup,
            )
                .chain(),
        )
        .configure_sets(
            FixedUpdate,
            (SimulationSet::Movement, SimulationSet::Contact).chain(),
        )
        .add_plugins((
            DisruptionPlugin,
            AIPlugin::<W>::default(),
            CombatPlugin::<W>::default(),
        ))
        .add_systems(Startup, spawn::spawn_from_table);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Длительность одного тика headless прогона (60 Hz)
pub const HEADLESS_TICK: Duration = Duration::from_nanos(16_666_667);

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается ровно на `HEADLESS_TICK` за `app.update()` -
/// один Update и один FixedUpdate на тик, прогоны воспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(HEADLESS_TICK)) // 60Hz FixedUpdate
        .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_TICK));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
