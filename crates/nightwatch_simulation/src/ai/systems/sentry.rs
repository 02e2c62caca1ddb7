//! Sentry perception system.

use bevy::prelude::*;

use crate::ai::{AlarmTriggered, Sentry};
use crate::components::{bearing_to_direction, Position};
use crate::disruption::{Dead, Disruption};
use crate::layers::LAYER_ENEMIES;
use crate::spatial::WorldQuery;
use crate::vision::{scan, Perceiver};

/// Система: VisionProbe + sentry FSM + alarm broadcast
pub fn update_sentries<W: WorldQuery + Resource>(
    world: Res<W>,
    time: Res<Time>,
    mut sentries: Query<(Entity, &Position, &Perceiver, &Disruption, &mut Sentry), Without<Dead>>,
    positions: Query<&Position>,
    mut alarms: EventWriter<AlarmTriggered>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    let mut order: Vec<Entity> = sentries.iter().map(|(entity, ..)| entity).collect();
    order.sort();

    for entity in order {
        let Ok((_, position, perceiver, disruption, mut sentry)) = sentries.get_mut(entity) else {
            continue;
        };

        if disruption.is_disabled() {
            if sentry.suspend() {
                crate::logger::log(&format!("🔌 Sentry {:?} disabled", entity));
            }
            continue;
        }
        if sentry.resume() {
            crate::logger::log(&format!("🔌 Sentry {:?} back to sweep", entity));
        }

        let origin = position.0;
        let sighting = if sentry.vision_enabled {
            let cone = perceiver.cone(origin, bearing_to_direction(sentry.bearing));
            scan(&*world, perceiver, &cone)
        } else {
            None
        };

        let alarm = sentry.tick(now, dt, origin, sighting, |e| positions.get(e).ok().map(|p| p.0));

        if let Some(target) = alarm {
            let mut notified: Vec<Entity> = world
                .query_nearby(origin, sentry.notify_radius, LAYER_ENEMIES)
                .into_iter()
                .map(|candidate| candidate.entity)
                .filter(|other| *other != entity)
                .collect();
            notified.sort();

            crate::logger::log_info(&format!(
                "🚨 Sentry {:?} alarm on {:?}, notifying {} enemies",
                entity,
                target,
                notified.len()
            ));
            alarms.write(AlarmTriggered {
                sentry: entity,
                origin,
                target,
                notified,
            });
        }
    }
}
