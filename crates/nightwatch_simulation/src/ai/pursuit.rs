//! Pursuit FSM для мобильных guards
//!
//! Patrol → Chase → Return → Patrol
//!
//! Disabled - не отдельное состояние, а внешний gate (`Disruption`):
//! пока он активен, `evaluate` не вызывается, всё внутреннее состояние
//! (target, last_seen, pre_chase_position) замораживается как есть.

use bevy::prelude::*;
use rand::Rng;

use crate::patrol::PatrolMover;
use crate::timer::DeferredTimer;

/// Pursuit состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PursuitState {
    /// Идём по маршруту
    #[default]
    Patrol,

    /// Преследуем цель (weak reference - entity может исчезнуть)
    Chase { target: Entity },

    /// Возвращаемся на pre-chase позицию
    Return,
}

impl PursuitState {
    pub fn target(&self) -> Option<Entity> {
        match self {
            Self::Chase { target } => Some(*target),
            _ => None,
        }
    }
}

/// Что perception увидел в этом тике
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PursuitInput {
    /// Текущая цель погони подтверждена лучом (`can_see`)
    pub confirmed: bool,
    /// Ближайшая видимая цель (`compute_visible_target`)
    pub detected: Option<Entity>,
}

/// Смена состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PursuitTransition {
    pub from: PursuitState,
    pub to: PursuitState,
}

/// Pursuit агент
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PursuitAgent {
    pub state: PursuitState,
    /// Время последнего подтверждённого контакта (секунды)
    pub last_seen: f32,
    /// Откуда началась погоня (ставится только на Patrol → Chase)
    pub pre_chase_position: Option<Vec2>,
    /// Активный множитель скорости
    pub speed_multiplier: f32,
    /// Lost-sight deadline (last_seen + lost_sight_delay)
    pub lost_sight: DeferredTimer,
    pub chase_speed_multiplier: f32,
    /// Сколько секунд без контакта до Return
    pub lost_sight_delay: f32,
    /// Радиус "вернулись" (метры)
    pub return_tolerance: f32,
}

impl Default for PursuitAgent {
    fn default() -> Self {
        Self {
            state: PursuitState::Patrol,
            last_seen: 0.0,
            pre_chase_position: None,
            speed_multiplier: 1.0,
            lost_sight: DeferredTimer::default(),
            chase_speed_multiplier: 1.4,
            lost_sight_delay: 2.0,
            return_tolerance: 0.3,
        }
    }
}

impl PursuitAgent {
    /// Один тик FSM. Возвращает transition, если состояние сменилось.
    pub fn evaluate<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        position: Vec2,
        input: PursuitInput,
        mover: &mut PatrolMover,
        rng: &mut R,
    ) -> Option<PursuitTransition> {
        let from = self.state;

        match self.state {
            PursuitState::Patrol => {
                if let Some(target) = input.detected {
                    self.pre_chase_position = Some(position);
                    self.enter_chase(now, target, mover);
                }
            }

            PursuitState::Chase { target } => {
                if let Some(seen) = input.detected {
                    self.state = PursuitState::Chase { target: seen };
                    self.refresh(now);
                } else if input.confirmed {
                    self.state = PursuitState::Chase { target };
                    self.refresh(now);
                } else {
                    if !self.lost_sight.is_armed() {
                        self.lost_sight
                            .arm_at(self.last_seen + self.lost_sight_delay);
                    }
                    if self.lost_sight.fire(now) {
                        self.enter_return(position, mover);
                    }
                }
            }

            PursuitState::Return => {
                if let Some(target) = input.detected {
                    // pre_chase_position не перезаписываем
                    self.enter_chase(now, target, mover);
                } else {
                    let home = self.pre_chase_position.unwrap_or(position);
                    if position.distance(home) <= self.return_tolerance {
                        self.pre_chase_position = None;
                        self.state = PursuitState::Patrol;
                        mover.pick_next_target(position, rng);
                    }
                }
            }
        }

        (self.state != from).then_some(PursuitTransition {
            from,
            to: self.state,
        })
    }

    /// Disabled gate: pending lost-sight bookkeeping отменяется,
    /// pre_chase_position и last_seen остаются.
    pub fn suspend(&mut self) {
        self.lost_sight.cancel();
    }

    fn refresh(&mut self, now: f32) {
        self.last_seen = now;
        self.lost_sight.cancel();
    }

    fn enter_chase(&mut self, now: f32, target: Entity, mover: &mut PatrolMover) {
        self.state = PursuitState::Chase { target };
        self.speed_multiplier = self.chase_speed_multiplier;
        mover.set_speed_multiplier(self.chase_speed_multiplier);
        self.refresh(now);
    }

    fn enter_return(&mut self, position: Vec2, mover: &mut PatrolMover) {
        self.state = PursuitState::Return;
        self.speed_multiplier = 1.0;
        mover.restore_speed();
        mover.go_to_position(self.pre_chase_position.unwrap_or(position));
    }
}
