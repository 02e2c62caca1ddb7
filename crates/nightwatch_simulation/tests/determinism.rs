//! Тесты детерминизма
//!
//! Одинаковый seed → побайтово одинаковый снапшот мира после прогона
//! (roam-точки берутся из DeterministicRng).

use bevy::prelude::*;
use nightwatch_simulation::spatial::Occluder;
use nightwatch_simulation::*;

const TICK_COUNT: usize = 600;

/// Игрок, идущий по прямой через сцену
#[derive(Component, Debug)]
struct Walker {
    velocity: Vec2,
}

fn walk(time: Res<Time>, mut query: Query<(&mut Position, &Walker)>) {
    let dt = time.delta_secs();
    for (mut position, walker) in query.iter_mut() {
        position.0 += walker.velocity * dt;
    }
}

/// Запускает сцену и возвращает snapshot мира
fn run_simulation(seed: u64) -> Vec<u8> {
    let mut app = create_headless_app(seed);

    let roam = |x: f32, y: f32| SpawnConfig {
        patrol_route: Some(PatrolRouteConfig::Roam {
            center: Some([x, y]),
            radius: 4.0,
        }),
        ..default()
    };

    app.insert_resource(
        StaticWorld::new().with_occluder(Occluder::wall(Vec2::new(2.0, -1.0), Vec2::new(2.4, 1.0))),
    )
    .insert_resource(SpawnTable {
        points: vec![
            SpawnPoint::guard(Vec2::new(-3.0, 0.0), roam(-3.0, 0.0)),
            SpawnPoint::guard(Vec2::new(5.0, 5.0), roam(5.0, 5.0)),
            SpawnPoint::sentry(Vec2::new(0.0, 6.0), SpawnConfig::default()),
        ],
    })
    .add_plugins((
        StaticWorldPlugin,
        SimulationPlugin::<StaticWorld>::default(),
    ))
    .add_systems(FixedUpdate, walk.in_set(SimulationSet::Movement));

    app.world_mut().spawn((
        Position(Vec2::new(8.0, -2.0)),
        Detectable::default(),
        Walker {
            velocity: Vec2::new(-1.0, 0.4),
        },
    ));

    for _ in 0..TICK_COUNT {
        app.update();
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Position>(world);
    snapshot.extend(world_snapshot::<PursuitAgent>(world));
    snapshot.extend(world_snapshot::<Sentry>(world));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED);
    let snapshot2 = run_simulation(SEED);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_different_seed_changes_roam() {
    let snapshot1 = run_simulation(1);
    let snapshot2 = run_simulation(2);

    assert_ne!(snapshot1, snapshot2);
}
