//! Sentry FSM - стационарный вращающийся детектор
//!
//! Sweep ⇄ Track (+ Alert флаг), Disabled - level-triggered от `Disruption`.
//!
//! Pivot bearing в градусах. Track поворачивает pivot к цели с ограниченной
//! угловой скоростью (`sweep_speed` °/с), без overshoot.

use bevy::prelude::*;

use crate::components::{direction_to_bearing, rotate_towards, wrap_degrees};
use crate::spatial::Candidate;

/// Sentry состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SentryState {
    #[default]
    Sweep,
    Track,
    Disabled,
}

/// Отслеживаемая цель: entity + последняя известная позиция
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TrackedTarget {
    pub entity: Entity,
    pub position: Vec2,
}

/// Конфигурация до отключения (восстанавливается на resume)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct SentrySnapshot {
    pub sweep_enabled: bool,
    pub vision_enabled: bool,
}

/// Sentry компонент
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Sentry {
    pub state: SentryState,
    /// Валиден только в Track
    pub alert: bool,
    pub target: Option<TrackedTarget>,
    /// Непрерывное удержание одной и той же цели (секунды)
    pub lock_timer: f32,
    pub last_seen: f32,
    /// Текущий bearing pivot'а (градусы)
    pub bearing: f32,
    /// Центр sweep-дуги
    pub rest_bearing: f32,
    pub sweep_enabled: bool,
    pub vision_enabled: bool,
    snapshot: Option<SentrySnapshot>,
    /// Угловая скорость (°/с), она же лимит поворота в Track
    pub sweep_speed: f32,
    /// Полная ширина sweep-дуги (градусы)
    pub sweep_arc: f32,
    pub alert_hold_time: f32,
    pub lost_sight_delay: f32,
    pub notify_radius: f32,
}

impl Default for Sentry {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Sentry {
    pub fn new(rest_bearing: f32) -> Self {
        let rest_bearing = wrap_degrees(rest_bearing);
        Self {
            state: SentryState::Sweep,
            alert: false,
            target: None,
            lock_timer: 0.0,
            last_seen: 0.0,
            bearing: rest_bearing,
            rest_bearing,
            sweep_enabled: true,
            vision_enabled: true,
            snapshot: None,
            sweep_speed: 20.0,
            sweep_arc: 60.0,
            alert_hold_time: 2.0,
            lost_sight_delay: 2.0,
            notify_radius: 8.0,
        }
    }

    pub fn snapshot(&self) -> Option<SentrySnapshot> {
        self.snapshot
    }

    /// Целевой bearing sweep-колебания в момент `now`.
    pub fn sweep_bearing(&self, now: f32) -> f32 {
        let phase = (now * self.sweep_speed * 0.01).sin();
        wrap_degrees(self.rest_bearing + phase * self.sweep_arc * 0.5)
    }

    /// Один тик.
    ///
    /// `sighting` - результат VisionProbe (None если зрение выключено).
    /// `locate` - живая позиция entity (None если entity исчезла).
    /// Возвращает цель, если в этом тике поднята тревога.
    pub fn tick(
        &mut self,
        now: f32,
        dt: f32,
        origin: Vec2,
        sighting: Option<Candidate>,
        locate: impl Fn(Entity) -> Option<Vec2>,
    ) -> Option<Entity> {
        if self.state == SentryState::Disabled {
            return None;
        }

        let mut alarm = None;

        if let Some(seen) = sighting {
            let same_target = self.target.map(|t| t.entity) == Some(seen.entity);
            if !same_target {
                self.lock_timer = 0.0;
            }

            self.target = Some(TrackedTarget {
                entity: seen.entity,
                position: seen.position,
            });
            self.last_seen = now;
            self.state = SentryState::Track;

            self.lock_timer += dt;
            if !self.alert && self.lock_timer >= self.alert_hold_time {
                self.alert = true;
                alarm = Some(seen.entity);
            }
        } else if self.state == SentryState::Track {
            if let Some(tracked) = self.target.as_mut() {
                if let Some(position) = locate(tracked.entity) {
                    tracked.position = position;
                }
            }

            if now - self.last_seen > self.lost_sight_delay {
                self.release();
            }
        }

        self.rotate(now, dt, origin);
        alarm
    }

    fn rotate(&mut self, now: f32, dt: f32, origin: Vec2) {
        let max_step = self.sweep_speed * dt;

        match self.state {
            SentryState::Track => {
                let Some(tracked) = self.target else {
                    return;
                };
                let to_target = tracked.position - origin;
                if to_target.length_squared() > f32::EPSILON {
                    self.bearing =
                        rotate_towards(self.bearing, direction_to_bearing(to_target), max_step);
                }
            }
            SentryState::Sweep if self.sweep_enabled => {
                self.bearing = rotate_towards(self.bearing, self.sweep_bearing(now), max_step);
            }
            _ => {}
        }
    }

    /// Track → Sweep
    fn release(&mut self) {
        self.state = SentryState::Sweep;
        self.target = None;
        self.lock_timer = 0.0;
        self.alert = false;
    }

    /// Вход в Disabled. Snapshot берётся только на первом входе;
    /// повторный вызов в Disabled ничего не меняет (false).
    pub fn suspend(&mut self) -> bool {
        if self.state == SentryState::Disabled {
            return false;
        }

        if self.snapshot.is_none() {
            self.snapshot = Some(SentrySnapshot {
                sweep_enabled: self.sweep_enabled,
                vision_enabled: self.vision_enabled,
            });
        }

        self.sweep_enabled = false;
        self.vision_enabled = false;
        self.release();
        self.state = SentryState::Disabled;
        true
    }

    /// Выход из Disabled: восстановить snapshot, Sweep без цели.
    pub fn resume(&mut self) -> bool {
        if self.state != SentryState::Disabled {
            return false;
        }

        if let Some(snapshot) = self.snapshot.take() {
            self.sweep_enabled = snapshot.sweep_enabled;
            self.vision_enabled = snapshot.vision_enabled;
        }
        self.release();
        true
    }
}
