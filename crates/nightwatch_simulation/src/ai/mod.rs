//! AI decision-making module
//!
//! Два автомата поверх общего VisionProbe:
//! - pursuit: мобильный guard (Patrol → Chase → Return)
//! - sentry: стационарный детектор (Sweep ⇄ Track + Alert)
//!
//! Оба гейтятся `Disruption` (disabled / dead).

use bevy::prelude::*;
use std::marker::PhantomData;

use crate::spatial::WorldQuery;
use crate::SimulationSet;

pub mod events;
pub mod pursuit;
pub mod sentry;
pub mod systems;

#[cfg(test)]
mod sentry_tests;

// Re-export основных типов
pub use events::{AlarmTriggered, PursuitChanged};
pub use pursuit::{PursuitAgent, PursuitInput, PursuitState, PursuitTransition};
pub use sentry::{Sentry, SentrySnapshot, SentryState, TrackedTarget};

/// AI Plugin
///
/// Update (SimulationSet::Perception), последовательно:
/// 1. update_pursuit_agents - VisionProbe + pursuit FSM
/// 2. update_sentries - VisionProbe + sentry FSM + alarm broadcast
///
/// FixedUpdate (SimulationSet::Movement):
/// - move_agents - patrol advance / chase homing, единственный writer Position
pub struct AIPlugin<W> {
    _world: PhantomData<fn() -> W>,
}

impl<W> Default for AIPlugin<W> {
    fn default() -> Self {
        Self {
            _world: PhantomData,
        }
    }
}

impl<W: WorldQuery + Resource> Plugin for AIPlugin<W> {
    fn build(&self, app: &mut App) {
        app.add_event::<PursuitChanged>()
            .add_event::<AlarmTriggered>();

        app.add_systems(
            Update,
            (
                systems::update_pursuit_agents::<W>,
                systems::update_sentries::<W>,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Perception),
        )
        .add_systems(
            FixedUpdate,
            systems::move_agents.in_set(SimulationSet::Movement),
        );
    }
}
