//! Headless симуляция Nightwatch
//!
//! Один guard на квадратном маршруте, один sentry у стены и игрок,
//! идущий через комнату. Печатает события FSM и disruption.

use bevy::prelude::*;
use nightwatch_simulation::spatial::Occluder;
use nightwatch_simulation::*;

/// Игрок демо-сцены (движется по прямой с постоянной скоростью)
#[derive(Component, Debug)]
struct DemoPlayer {
    velocity: Vec2,
}

fn walk_player(time: Res<Time>, mut players: Query<(&mut Position, &DemoPlayer)>) {
    let dt = time.delta_secs();
    for (mut position, player) in players.iter_mut() {
        position.0 += player.velocity * dt;
    }
}

fn report_events(
    mut pursuit: EventReader<PursuitChanged>,
    mut alarms: EventReader<AlarmTriggered>,
    mut disruption: EventReader<DisruptionEvent>,
    mut contacts: EventReader<ContactHit>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for event in pursuit.read() {
        println!("[{:6.2}s] guard {:?}: {:?} -> {:?}", now, event.agent, event.from, event.to);
    }
    for event in alarms.read() {
        println!(
            "[{:6.2}s] ALARM from {:?} on {:?}, notified {:?}",
            now, event.sentry, event.target, event.notified
        );
    }
    for event in disruption.read() {
        println!("[{:6.2}s] disruption {:?}", now, event);
    }
    for event in contacts.read() {
        println!("[{:6.2}s] contact {:?}", now, event);
    }
}

fn main() {
    let seed = 42;
    println!("Starting Nightwatch headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    app.insert_resource(
        StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(-1.0, 6.0), Vec2::new(9.0, 6.5)))
            .with_occluder(Occluder::wall(Vec2::new(3.0, 2.0), Vec2::new(3.3, 3.0))),
    )
    .insert_resource(SpawnTable {
        points: vec![
            SpawnPoint::guard(
                Vec2::ZERO,
                SpawnConfig {
                    patrol_route: Some(PatrolRouteConfig::Waypoints {
                        points: vec![[0.0, 0.0], [6.0, 0.0], [6.0, 5.0], [0.0, 5.0]],
                        looping: true,
                    }),
                    ..default()
                },
            ),
            SpawnPoint::sentry(
                Vec2::new(8.0, 5.5),
                SpawnConfig {
                    rest_bearing_degrees: -135.0,
                    range: 8.0,
                    ..default()
                },
            ),
        ],
    })
    .add_plugins((
        StaticWorldPlugin,
        SimulationPlugin::<StaticWorld>::default(),
    ))
    .add_systems(FixedUpdate, walk_player.in_set(SimulationSet::Movement))
    .add_systems(Update, report_events.after(SimulationSet::Cleanup));

    app.world_mut().spawn((
        Position(Vec2::new(10.0, 1.0)),
        Detectable::default(),
        DemoPlayer {
            velocity: Vec2::new(-0.8, 0.1),
        },
    ));

    // 20 секунд симуляции
    for tick in 0..1200 {
        app.update();

        if tick == 600 {
            // Оглушаем все sentries на 3 секунды
            let world = app.world_mut();
            let sentries: Vec<Entity> = world
                .query_filtered::<Entity, With<Sentry>>()
                .iter(world)
                .collect();
            for sentry in sentries {
                world.send_event(DisruptionIntent::DisableTemporarily {
                    target: sentry,
                    seconds: 3.0,
                });
            }
        }

        if tick % 300 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}
