//! Combat - контактный урон guards по party
//!
//! ECS решает только "кто кого коснулся и когда". Применение урона к игроку
//! (здоровье, knockback, UI) - на стороне коллаборатора через `ContactHit`.

use bevy::prelude::*;
use std::marker::PhantomData;

use crate::spatial::WorldQuery;
use crate::SimulationSet;

pub mod contact;

pub use contact::{contact_damage, ContactDamage, ContactHit};

/// Combat Plugin
///
/// FixedUpdate (SimulationSet::Contact, после движения): contact_damage
pub struct CombatPlugin<W> {
    _world: PhantomData<fn() -> W>,
}

impl<W> Default for CombatPlugin<W> {
    fn default() -> Self {
        Self {
            _world: PhantomData,
        }
    }
}

impl<W: WorldQuery + Resource> Plugin for CombatPlugin<W> {
    fn build(&self, app: &mut App) {
        app.add_event::<ContactHit>()
            .add_systems(
                FixedUpdate,
                contact_damage::<W>.in_set(SimulationSet::Contact),
            );
    }
}
