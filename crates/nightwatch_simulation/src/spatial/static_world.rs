//! StaticWorld - in-memory реализация `WorldQuery`
//!
//! Статическая геометрия (стены, мебель) + динамические bodies,
//! которые пересобираются каждый Update-тик из `Detectable` + `Position`.

use bevy::prelude::*;

use super::{Candidate, RayHit, WorldQuery};
use crate::components::{Detectable, Position};
use crate::SimulationSet;

/// Форма occluder'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned прямоугольник
    Rect { min: Vec2, max: Vec2 },
    Circle { center: Vec2, radius: f32 },
}

impl Shape {
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            Shape::Rect { min, max } => {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            }
            Shape::Circle { center, radius } => point.distance_squared(center) <= radius * radius,
        }
    }

    /// Дистанция входа луча в форму (0 если origin внутри).
    pub fn ray_entry(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        match *self {
            Shape::Rect { min, max } => ray_rect(origin, direction, max_distance, min, max),
            Shape::Circle { center, radius } => {
                ray_circle(origin, direction, max_distance, center, radius)
            }
        }
    }
}

/// Статический occluder на слое
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occluder {
    pub shape: Shape,
    pub layer: u32,
}

impl Occluder {
    pub fn rect(min: Vec2, max: Vec2, layer: u32) -> Self {
        Self {
            shape: Shape::Rect {
                min: min.min(max),
                max: min.max(max),
            },
            layer,
        }
    }

    pub fn circle(center: Vec2, radius: f32, layer: u32) -> Self {
        Self {
            shape: Shape::Circle { center, radius },
            layer,
        }
    }

    /// Стена (LAYER_WALLS)
    pub fn wall(min: Vec2, max: Vec2) -> Self {
        Self::rect(min, max, crate::layers::LAYER_WALLS)
    }
}

/// Динамическое тело (снапшот entity за этот тик)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub layer: u32,
}

impl Body {
    fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.position,
            radius: self.radius,
        }
    }
}

/// In-memory мир: occluders + bodies
#[derive(Resource, Debug, Clone, Default)]
pub struct StaticWorld {
    occluders: Vec<Occluder>,
    bodies: Vec<Body>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occluder(mut self, occluder: Occluder) -> Self {
        self.occluders.push(occluder);
        self
    }

    pub fn add_occluder(&mut self, occluder: Occluder) {
        self.occluders.push(occluder);
    }

    pub fn occluders(&self) -> &[Occluder] {
        &self.occluders
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Заменить все bodies (снапшот тика)
    pub fn set_bodies(&mut self, bodies: impl IntoIterator<Item = Body>) {
        self.bodies.clear();
        self.bodies.extend(bodies);
    }

    pub fn insert_body(&mut self, body: Body) {
        self.bodies.retain(|b| b.entity != body.entity);
        self.bodies.push(body);
    }
}

impl WorldQuery for StaticWorld {
    fn query_nearby(&self, point: Vec2, radius: f32, mask: u32) -> Vec<Candidate> {
        let radius_sq = radius * radius;
        self.bodies
            .iter()
            .filter(|b| b.layer & mask != 0)
            .filter(|b| b.position.distance_squared(point) <= radius_sq)
            .map(|b| Candidate::new(b.entity, b.position))
            .collect()
    }

    fn overlaps_point(&self, point: Vec2, mask: u32) -> bool {
        let occluded = self
            .occluders
            .iter()
            .any(|o| o.layer & mask != 0 && o.shape.contains(point));

        occluded
            || self
                .bodies
                .iter()
                .any(|b| b.layer & mask != 0 && b.shape().contains(point))
    }

    fn raycast_first_hit(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: u32,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        let static_hits = self
            .occluders
            .iter()
            .filter(|o| o.layer & mask != 0)
            .filter_map(|o| o.shape.ray_entry(origin, direction, max_distance))
            .map(|distance| RayHit {
                entity: None,
                distance,
            });

        let body_hits = self
            .bodies
            .iter()
            .filter(|b| b.layer & mask != 0)
            .filter_map(|b| {
                b.shape()
                    .ray_entry(origin, direction, max_distance)
                    .map(|distance| RayHit {
                        entity: Some(b.entity),
                        distance,
                    })
            });

        static_hits
            .chain(body_hits)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn ray_circle(origin: Vec2, direction: Vec2, max_distance: f32, center: Vec2, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(direction);
    let c = m.length_squared() - radius * radius;

    // Origin снаружи и луч смотрит от круга
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()).max(0.0);
    (t <= max_distance).then_some(t)
}

fn ray_rect(origin: Vec2, direction: Vec2, max_distance: f32, min: Vec2, max: Vec2) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;

    for axis in 0..2 {
        let (o, d, lo, hi) = if axis == 0 {
            (origin.x, direction.x, min.x, max.x)
        } else {
            (origin.y, direction.y, min.y, max.y)
        };

        if d.abs() < f32::EPSILON {
            // Луч параллелен slab'у - должен быть внутри
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));

        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Система: пересборка bodies из ECS (консистентный снапшот тика)
pub fn sync_static_world(
    mut world: ResMut<StaticWorld>,
    bodies: Query<(Entity, &Position, &Detectable)>,
) {
    world.set_bodies(bodies.iter().map(|(entity, position, detectable)| Body {
        entity,
        position: position.0,
        radius: detectable.radius,
        layer: detectable.layer,
    }));
}

/// Plugin: StaticWorld resource + sync до perception
pub struct StaticWorldPlugin;

impl Plugin for StaticWorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StaticWorld>()
            .add_systems(Update, sync_static_world.in_set(SimulationSet::WorldSync));
    }
}
