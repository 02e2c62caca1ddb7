//! World query service - то, что симуляция ЧИТАЕТ из мира
//!
//! Core только вызывает эти запросы, никогда не мутирует мир.
//! Реализация подставляется host'ом (физический движок игры) или
//! берётся `StaticWorld` для headless прогонов и тестов.
//!
//! Системы generic по `W: WorldQuery + Resource` - статический dispatch,
//! никакого runtime поиска capability.

use bevy::prelude::*;

pub mod static_world;

#[cfg(test)]
mod static_world_tests;

pub use static_world::{sync_static_world, Body, Occluder, Shape, StaticWorld, StaticWorldPlugin};

/// Кандидат из spatial-запроса: entity + позиция на момент снапшота
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec2,
}

impl Candidate {
    pub fn new(entity: Entity, position: Vec2) -> Self {
        Self { entity, position }
    }
}

/// Первое попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// `None` - статическая геометрия (стена, мебель)
    pub entity: Option<Entity>,
    /// Дистанция от origin до точки входа
    pub distance: f32,
}

/// Пространственные запросы к миру (read-only).
pub trait WorldQuery {
    /// Bodies на слоях `mask`, чей центр в пределах `radius` от `point`.
    fn query_nearby(&self, point: Vec2, radius: f32, mask: u32) -> Vec<Candidate>;

    /// Занята ли точка чем-то на слоях `mask`.
    fn overlaps_point(&self, point: Vec2, mask: u32) -> bool;

    /// Первое попадание луча (direction - unit vector).
    fn raycast_first_hit(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: u32,
    ) -> Option<RayHit>;

    /// Перекрыт ли отрезок a→b.
    ///
    /// По умолчанию - семплирование каждые `step` метров через `overlaps_point`:
    /// минимум один семпл, точка `a` не проверяется, точка `b` проверяется.
    fn is_segment_occluded(&self, a: Vec2, b: Vec2, mask: u32, step: f32) -> bool {
        let distance = a.distance(b);
        let steps = if step > 0.0 {
            ((distance / step).ceil() as usize).max(1)
        } else {
            1
        };

        (1..=steps).any(|i| {
            let sample = a.lerp(b, i as f32 / steps as f32);
            self.overlaps_point(sample, mask)
        })
    }
}
