//! World positioning компоненты: Position, Facing
//!
//! Мир плоский (2D, top-down). Углы - в градусах, 0° = +X, против часовой.

use bevy::prelude::*;

/// Позиция агента в мире (ECS authoritative)
///
/// Пишется ТОЛЬКО в FixedUpdate (movement). Perception в Update читает
/// консистентный снапшот - ни один агент не видит чужой частичный апдейт.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

/// Направление взгляда (unit vector). Для guards следует за движением.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::X)
    }
}

impl Facing {
    pub fn from_bearing(degrees: f32) -> Self {
        Self(bearing_to_direction(degrees))
    }

    pub fn bearing(&self) -> f32 {
        direction_to_bearing(self.0)
    }
}

/// Bearing (градусы) → unit vector
pub fn bearing_to_direction(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Vector → bearing в градусах, диапазон (-180, 180]
pub fn direction_to_bearing(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}

/// Беззнаковый угол между векторами (0..=180°). Нулевой вектор → 0°.
pub fn unsigned_angle_degrees(a: Vec2, b: Vec2) -> f32 {
    let denom = a.length() * b.length();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Нормализация угла в (-180, 180]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Поворот `current` к `target` не больше чем на `max_step` градусов.
///
/// Кратчайшим путём, без overshoot: если разница ≤ max_step - ровно target.
pub fn rotate_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = wrap_degrees(target - current);
    if delta.abs() <= max_step {
        wrap_degrees(target)
    } else {
        wrap_degrees(current + delta.signum() * max_step)
    }
}
