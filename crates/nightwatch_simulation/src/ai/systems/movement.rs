//! Movement system (FixedUpdate) - единственный writer Position.

use bevy::prelude::*;

use crate::ai::{PursuitAgent, PursuitState};
use crate::components::{Facing, Position};
use crate::disruption::{Dead, Disruption};
use crate::patrol::PatrolMover;
use crate::DeterministicRng;

/// Система: движение guards
///
/// - Patrol / Return → `PatrolMover::advance` (Return идёт по override-точке)
/// - Chase → прямой homing к живой позиции цели, без обхода препятствий
///
/// Facing следует за направлением шага.
pub fn move_agents(
    time: Res<Time>,
    mut rng: ResMut<DeterministicRng>,
    mut agents: Query<
        (
            Entity,
            &PursuitAgent,
            &Disruption,
            &mut PatrolMover,
            &mut Position,
            &mut Facing,
        ),
        Without<Dead>,
    >,
    targets: Query<&Position, Without<PursuitAgent>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let mut order: Vec<Entity> = agents.iter().map(|(entity, ..)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, agent, disruption, mut mover, mut position, mut facing)) =
            agents.get_mut(entity)
        else {
            continue;
        };

        if disruption.is_inert() {
            continue;
        }

        let step = match agent.state {
            PursuitState::Chase { target } => {
                let Ok(target_position) = targets.get(target) else {
                    continue;
                };
                (target_position.0 - position.0).clamp_length_max(mover.move_speed * dt)
            }
            PursuitState::Patrol | PursuitState::Return => {
                mover.advance(position.0, dt, &mut rng.rng)
            }
        };

        if step.length_squared() > f32::EPSILON * f32::EPSILON {
            position.0 += step;
            facing.0 = step.normalize();
        }
    }
}
