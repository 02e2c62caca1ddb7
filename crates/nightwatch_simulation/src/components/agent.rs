//! Компоненты участия агента в мире.

use bevy::prelude::*;

/// Тело в пространственном снапшоте мира (слой + радиус).
///
/// Entities с `Detectable` + `Position` попадают в `StaticWorld` каждый тик.
/// Снимается при смерти - мёртвый агент больше не коллайдит и не слышит alarm.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Detectable {
    /// Битовый слой (см. `crate::layers`)
    pub layer: u32,
    /// Радиус тела (метры)
    pub radius: f32,
}

impl Detectable {
    pub fn new(layer: u32, radius: f32) -> Self {
        Self { layer, radius }
    }
}

impl Default for Detectable {
    fn default() -> Self {
        Self {
            layer: crate::layers::LAYER_PARTY,
            radius: 0.3,
        }
    }
}
