//! Pursuit perception system.

use bevy::prelude::*;

use crate::ai::{PursuitAgent, PursuitChanged, PursuitInput, PursuitState};
use crate::components::{Facing, Position};
use crate::disruption::{Dead, Disruption};
use crate::patrol::PatrolMover;
use crate::spatial::{Candidate, WorldQuery};
use crate::vision::{can_see, scan, Perceiver};
use crate::DeterministicRng;

/// Система: VisionProbe + pursuit FSM для всех guards
///
/// Агенты обрабатываются в порядке Entity - результат не зависит от
/// порядка архетипов. Позиции читаются из снапшота, движение - в FixedUpdate.
pub fn update_pursuit_agents<W: WorldQuery + Resource>(
    world: Res<W>,
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<
        (
            Entity,
            &Position,
            &Facing,
            &Perceiver,
            &Disruption,
            &mut PursuitAgent,
            &mut PatrolMover,
        ),
        Without<Dead>,
    >,
    positions: Query<&Position>,
    mut changed: EventWriter<PursuitChanged>,
) {
    let now = time.elapsed_secs();

    let mut order: Vec<Entity> = agents.iter().map(|(entity, ..)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, position, facing, perceiver, disruption, mut agent, mut mover)) =
            agents.get_mut(entity)
        else {
            continue;
        };

        if disruption.is_inert() {
            agent.suspend();
            continue;
        }

        let cone = perceiver.cone(position.0, facing.0);

        // Исчезнувшая цель = "не видна", не ошибка
        let confirmed = match agent.state {
            PursuitState::Chase { target } if perceiver.enabled => positions
                .get(target)
                .is_ok_and(|p| can_see(&*world, &cone, Candidate::new(target, p.0))),
            _ => false,
        };
        let detected = scan(&*world, perceiver, &cone).map(|c| c.entity);

        let input = PursuitInput {
            confirmed,
            detected,
        };

        if let Some(transition) =
            agent.evaluate(now, position.0, input, &mut mover, &mut rng.rng)
        {
            crate::logger::log(&format!(
                "🎯 Guard {:?}: {:?} → {:?}",
                entity, transition.from, transition.to
            ));
            changed.write(PursuitChanged {
                agent: entity,
                from: transition.from,
                to: transition.to,
            });
        }
    }
}
