//! Patrol - выбор следующей точки маршрута и шаг движения к ней
//!
//! Два режима: waypoint-путь (loop / clamp на последней точке) и roam-зона
//! (случайная точка в круге). Поверх режима - одноразовый override
//! (`go_to_position`), которым pursuit возвращает агента на запомненную позицию.
//!
//! Модуль не знает про ECS-системы: `PatrolMover` двигает только
//! `ai::systems::movement` в FixedUpdate.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;


/// Override-точка считается достигнутой только вплотную (не по `waypoint_tolerance`)
const OVERRIDE_ARRIVAL: f32 = 1e-3;

/// Режим маршрута
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum PatrolRoute {
    Waypoints {
        points: Vec<Vec2>,
        looping: bool,
        /// Waypoint, к которому идём сейчас (`None` до первого выбора)
        index: Option<usize>,
    },
    Roam {
        center: Vec2,
        radius: f32,
    },
}

impl PatrolRoute {
    pub fn waypoints(points: Vec<Vec2>, looping: bool) -> Self {
        Self::Waypoints {
            points,
            looping,
            index: None,
        }
    }

    pub fn roam(center: Vec2, radius: f32) -> Self {
        Self::Roam { center, radius }
    }
}

impl Default for PatrolRoute {
    fn default() -> Self {
        Self::waypoints(Vec::new(), true)
    }
}

/// Патрульное движение агента
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PatrolMover {
    pub route: PatrolRoute,
    /// Текущая скорость (м/с), умножается на время погони
    pub move_speed: f32,
    /// Скорость без модификаторов
    pub base_speed: f32,
    /// Радиус "дошли до точки" (метры)
    pub waypoint_tolerance: f32,
    /// Пауза на waypoint'е (секунды)
    pub waypoint_dwell: f32,
    /// Пауза в roam-точке (секунды)
    pub roam_pause: f32,
    target: Option<Vec2>,
    override_target: Option<Vec2>,
    dwell_remaining: f32,
}

impl Default for PatrolMover {
    fn default() -> Self {
        Self::new(PatrolRoute::default(), 2.0)
    }
}

impl PatrolMover {
    pub fn new(route: PatrolRoute, move_speed: f32) -> Self {
        Self {
            route,
            move_speed,
            base_speed: move_speed,
            waypoint_tolerance: 0.2,
            waypoint_dwell: 0.5,
            roam_pause: 1.0,
            target: None,
            override_target: None,
            dwell_remaining: 0.0,
        }
    }

    /// Активная точка: override, иначе точка маршрута.
    pub fn target(&self) -> Option<Vec2> {
        self.override_target.or(self.target)
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.route {
            PatrolRoute::Waypoints { index, .. } => *index,
            PatrolRoute::Roam { .. } => None,
        }
    }

    pub fn is_overriding(&self) -> bool {
        self.override_target.is_some()
    }

    pub fn is_dwelling(&self) -> bool {
        self.dwell_remaining > 0.0
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.move_speed = self.base_speed * multiplier;
    }

    pub fn restore_speed(&mut self) {
        self.move_speed = self.base_speed;
    }

    /// Шаг движения за `dt`.
    ///
    /// Внутри tolerance - dwell-пауза (нулевой шаг), по её окончании
    /// `pick_next_target`. Override не дволлит и не переключается сам:
    /// агент доходит ровно до точки и стоит, пока владелец не вызовет
    /// `pick_next_target`.
    pub fn advance<R: Rng + ?Sized>(&mut self, current: Vec2, dt: f32, rng: &mut R) -> Vec2 {
        if let Some(point) = self.override_target {
            if current.distance(point) <= OVERRIDE_ARRIVAL {
                return Vec2::ZERO;
            }
            return (point - current).clamp_length_max(self.move_speed * dt);
        }

        if self.dwell_remaining > 0.0 {
            self.dwell_remaining -= dt;
            if self.dwell_remaining <= 0.0 {
                self.dwell_remaining = 0.0;
                self.pick_next_target(current, rng);
            }
            return Vec2::ZERO;
        }

        let target = match self.target {
            Some(target) => target,
            None => self.pick_next_target(current, rng),
        };

        if current.distance(target) <= self.waypoint_tolerance {
            let pause = match self.route {
                PatrolRoute::Waypoints { .. } => self.waypoint_dwell,
                PatrolRoute::Roam { .. } => self.roam_pause,
            };
            if pause > 0.0 {
                self.dwell_remaining = pause;
            } else {
                self.pick_next_target(current, rng);
            }
            return Vec2::ZERO;
        }

        self.step_towards(current, target, dt)
    }

    fn step_towards(&self, current: Vec2, target: Vec2, dt: f32) -> Vec2 {
        (target - current).normalize_or_zero() * self.move_speed * dt
    }

    /// Следующая точка маршрута. Сбрасывает override и dwell.
    ///
    /// Waypoints: index + 1, wrap в 0 если looping, иначе остаёмся на последнем.
    /// Пустой список → стоим на месте (`current`).
    pub fn pick_next_target<R: Rng + ?Sized>(&mut self, current: Vec2, rng: &mut R) -> Vec2 {
        self.override_target = None;
        self.dwell_remaining = 0.0;

        let next = match &mut self.route {
            PatrolRoute::Waypoints {
                points,
                looping,
                index,
            } => {
                if points.is_empty() {
                    *index = None;
                    current
                } else {
                    let last = points.len() - 1;
                    let next_index = match *index {
                        None => 0,
                        Some(i) if i >= last => {
                            if *looping {
                                0
                            } else {
                                last
                            }
                        }
                        Some(i) => i + 1,
                    };
                    *index = Some(next_index);
                    points[next_index]
                }
            }
            PatrolRoute::Roam { center, radius } => {
                // Равномерно по площади круга
                let r = radius.max(0.0) * rng.gen::<f32>().sqrt();
                let theta = TAU * rng.gen::<f32>();
                *center + Vec2::new(theta.cos(), theta.sin()) * r
            }
        };

        self.target = Some(next);
        next
    }

    /// Прямой переход в точку поверх маршрута (режим и index не меняются).
    pub fn go_to_position(&mut self, point: Vec2) {
        self.override_target = Some(point);
        self.dwell_remaining = 0.0;
    }
}
