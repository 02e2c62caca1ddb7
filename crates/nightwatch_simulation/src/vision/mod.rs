//! Vision - field-of-view + line-of-sight обнаружение
//!
//! Stateless: каждый тик `ViewCone` пересчитывается из Position/Facing
//! (guards) или bearing pivot'а (sentries) и прогоняется через фильтры:
//! range → angle → line of sight.
//!
//! Один LOS-примитив, два режима:
//! - `Sampled` - обнаружение: отрезок семплируется с шагом `sample_step`
//!   по маске `MASK_VISION_OCCLUDERS` (стены + крупные объекты).
//!   Тонкий occluder (< шага) может быть пропущен - это допуск режима.
//! - `Ray` - подтверждение уже выбранной цели: один луч по маске
//!   `MASK_SIGHT_RAY`; успех если луч ничего не задел или задел саму цель.
//!   Крупные объекты confirm-луч НЕ блокируют.

use bevy::prelude::*;

use crate::components::unsigned_angle_degrees;
use crate::layers::{LAYER_PARTY, MASK_SIGHT_RAY, MASK_VISION_OCCLUDERS};
use crate::spatial::{Candidate, WorldQuery};

#[cfg(test)]
mod vision_tests;

/// Параметры зрения агента
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Perceiver {
    /// Полный угол обзора (градусы)
    pub fov_degrees: f32,
    /// Дальность (метры)
    pub range: f32,
    /// Шаг семплирования sampled-LOS (метры)
    pub sample_step: f32,
    /// Слои, на которых ищем цели
    pub candidate_mask: u32,
    pub enabled: bool,
}

impl Default for Perceiver {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            range: 6.0,
            sample_step: 0.25,
            candidate_mask: LAYER_PARTY,
            enabled: true,
        }
    }
}

impl Perceiver {
    pub fn cone(&self, origin: Vec2, forward: Vec2) -> ViewCone {
        ViewCone {
            origin,
            forward,
            fov_degrees: self.fov_degrees,
            range: self.range,
        }
    }
}

/// Конус зрения на текущий тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCone {
    pub origin: Vec2,
    pub forward: Vec2,
    pub fov_degrees: f32,
    pub range: f32,
}

impl ViewCone {
    pub fn in_range(&self, point: Vec2) -> bool {
        self.origin.distance_squared(point) <= self.range * self.range
    }

    /// Внутри половины угла обзора от forward.
    /// Цель в самой точке origin считается видимой.
    pub fn in_arc(&self, point: Vec2) -> bool {
        let to_point = point - self.origin;
        if to_point.length_squared() <= f32::EPSILON {
            return true;
        }
        unsigned_angle_degrees(self.forward, to_point) <= self.fov_degrees * 0.5
    }
}

/// Режим проверки прямой видимости
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOfSightTest {
    Sampled { step: f32 },
    Ray,
}

/// Единый LOS-примитив для обнаружения и подтверждения.
pub fn line_of_sight<W: WorldQuery + ?Sized>(
    world: &W,
    origin: Vec2,
    target: Candidate,
    test: LineOfSightTest,
) -> bool {
    match test {
        LineOfSightTest::Sampled { step } => {
            !world.is_segment_occluded(origin, target.position, MASK_VISION_OCCLUDERS, step)
        }
        LineOfSightTest::Ray => {
            let to_target = target.position - origin;
            let distance = to_target.length();
            if distance <= f32::EPSILON {
                return true;
            }

            match world.raycast_first_hit(origin, to_target / distance, distance, MASK_SIGHT_RAY) {
                None => true,
                Some(hit) => hit.entity == Some(target.entity),
            }
        }
    }
}

/// Выбор видимой цели из кандидатов.
///
/// Ближайший прошедший все фильтры; при равной дистанции - меньший `Entity`.
/// Порядок входного слайса на результат не влияет.
pub fn compute_visible_target<W: WorldQuery + ?Sized>(
    world: &W,
    cone: &ViewCone,
    candidates: &[Candidate],
    sample_step: f32,
) -> Option<Candidate> {
    let mut in_cone: Vec<(f32, Candidate)> = candidates
        .iter()
        .filter(|c| cone.in_range(c.position))
        .filter(|c| cone.in_arc(c.position))
        .map(|c| (cone.origin.distance_squared(c.position), *c))
        .collect();

    in_cone.sort_by(|(da, a), (db, b)| da.total_cmp(db).then_with(|| a.entity.cmp(&b.entity)));

    in_cone
        .into_iter()
        .map(|(_, candidate)| candidate)
        .find(|candidate| {
            line_of_sight(
                world,
                cone.origin,
                *candidate,
                LineOfSightTest::Sampled { step: sample_step },
            )
        })
}

/// Подтверждение конкретной цели: range + angle + один луч.
pub fn can_see<W: WorldQuery + ?Sized>(world: &W, cone: &ViewCone, target: Candidate) -> bool {
    cone.in_range(target.position)
        && cone.in_arc(target.position)
        && line_of_sight(world, cone.origin, target, LineOfSightTest::Ray)
}

/// Полный проход: spatial-запрос кандидатов + `compute_visible_target`.
pub fn scan<W: WorldQuery + ?Sized>(
    world: &W,
    perceiver: &Perceiver,
    cone: &ViewCone,
) -> Option<Candidate> {
    if !perceiver.enabled {
        return None;
    }

    let candidates = world.query_nearby(cone.origin, cone.range, perceiver.candidate_mask);
    if candidates.is_empty() {
        return None;
    }

    compute_visible_target(world, cone, &candidates, perceiver.sample_step)
}
