//! Disruption systems: intents, re-enable таймеры, смерть и деспавн.

use bevy::prelude::*;

use crate::components::Detectable;
use crate::disruption::{
    Damageable, DamageOutcome, Dead, DespawnAfter, DisableOutcome, Disruption, DisruptionEvent,
    DisruptionIntent,
};

/// Система: обработка входящих DisruptionIntent
///
/// Intents против мёртвых или несуществующих entities игнорируются.
/// Некорректные значения (amount ≤ 0, seconds ≤ 0) - warning + ignore.
pub fn apply_disruption_intents(
    mut commands: Commands,
    mut intents: EventReader<DisruptionIntent>,
    mut targets: Query<&mut Disruption, Without<Dead>>,
    mut events: EventWriter<DisruptionEvent>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for intent in intents.read() {
        let entity = intent.target();
        let Ok(mut disruption) = targets.get_mut(entity) else {
            continue;
        };

        match *intent {
            DisruptionIntent::TakeDamage { amount, .. } => {
                if amount <= 0 {
                    crate::logger::log_warning(&format!(
                        "Rejected TakeDamage({}) for {:?}: amount must be positive",
                        amount, entity
                    ));
                    continue;
                }

                match disruption.take_damage(amount as u32) {
                    DamageOutcome::Ignored => {}
                    DamageOutcome::Hit => {
                        crate::logger::log(&format!(
                            "💥 {:?} took {} damage ({} HP left)",
                            entity, amount, disruption.hit_points
                        ));
                        events.write(DisruptionEvent::Hit { entity });
                    }
                    DamageOutcome::Killed => {
                        events.write(DisruptionEvent::Hit { entity });
                        handle_death(&mut commands, &mut events, entity, &disruption, now);
                    }
                }
            }
            DisruptionIntent::TakeFreezeHit { .. } => match disruption.take_freeze_hit() {
                DamageOutcome::Ignored => {}
                DamageOutcome::Hit => {
                    crate::logger::log(&format!(
                        "❄️ {:?} freeze hit {}/{}",
                        entity, disruption.freeze_hits, disruption.freeze_hits_to_die
                    ));
                    events.write(DisruptionEvent::FreezeHit { entity });
                }
                DamageOutcome::Killed => {
                    events.write(DisruptionEvent::FreezeHit { entity });
                    handle_death(&mut commands, &mut events, entity, &disruption, now);
                }
            },
            DisruptionIntent::DisableTemporarily { seconds, .. } => {
                match disruption.disable_temporarily(now, seconds) {
                    DisableOutcome::Ignored => {
                        crate::logger::log_warning(&format!(
                            "Rejected DisableTemporarily({}) for {:?}",
                            seconds, entity
                        ));
                    }
                    DisableOutcome::Frozen => {
                        crate::logger::log(&format!("🧊 {:?} disabled for {:.2}s", entity, seconds));
                        events.write(DisruptionEvent::Frozen {
                            entity,
                            frozen: true,
                        });
                    }
                    DisableOutcome::Extended => {
                        crate::logger::log(&format!(
                            "🧊 {:?} disable restarted: {:.2}s",
                            entity, seconds
                        ));
                    }
                }
            }
        }
    }
}

/// Смерть: Dead маркер, коллизия off (Detectable снимается), деспавн через grace.
fn handle_death(
    commands: &mut Commands,
    events: &mut EventWriter<DisruptionEvent>,
    entity: Entity,
    disruption: &Disruption,
    now: f32,
) {
    let despawn_time = now + disruption.death_grace;

    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands
            .insert((Dead, DespawnAfter { despawn_time }))
            .remove::<Detectable>();
    }

    crate::logger::log_info(&format!(
        "💀 {:?} died, despawn at {:.2}s",
        entity, despawn_time
    ));
    events.write(DisruptionEvent::Died { entity });
}

/// Система: re-enable по истечении DisableTemporarily
pub fn tick_disruption_timers(
    mut query: Query<(Entity, &mut Disruption), Without<Dead>>,
    mut events: EventWriter<DisruptionEvent>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for (entity, mut disruption) in query.iter_mut() {
        if disruption.tick(now) {
            crate::logger::log(&format!("🔓 {:?} re-enabled", entity));
            events.write(DisruptionEvent::Frozen {
                entity,
                frozen: false,
            });
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
