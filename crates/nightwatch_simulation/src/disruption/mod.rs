//! Disruption lifecycle - здоровье, freeze-хиты, временное отключение, смерть
//!
//! Общий gate для guard'ов и sentry: пока агент disabled или dead,
//! perception и движение для него не выполняются.
//!
//! Входящие вызовы приходят как `DisruptionIntent` события, исходящие -
//! `DisruptionEvent`. Единственный re-enable таймер живёт здесь, поэтому
//! вложенные `DisableTemporarily` только перезапускают его.

use bevy::prelude::*;

use crate::timer::DeferredTimer;
use crate::SimulationSet;

pub mod events;
pub mod systems;

#[cfg(test)]
mod disruption_tests;

pub use events::{DisruptionEvent, DisruptionIntent};
pub use systems::{apply_disruption_intents, despawn_after_timeout, tick_disruption_timers};

/// Результат попадания
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Агент уже мёртв или урон нулевой
    Ignored,
    Hit,
    /// Это попадание убило агента
    Killed,
}

/// Результат `disable_temporarily`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableOutcome {
    Ignored,
    /// Был активен → теперь disabled
    Frozen,
    /// Уже был disabled, таймер перезапущен
    Extended,
}

/// Статический capability: всё, что можно ранить.
pub trait Damageable {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;
    fn is_dead(&self) -> bool;
}

/// Состояние disruption агента
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Disruption {
    pub hit_points: u32,
    pub max_hit_points: u32,
    pub freeze_hits: u32,
    pub freeze_hits_to_die: u32,
    /// Сколько труп остаётся в мире до деспавна (секунды)
    pub death_grace: f32,
    disabled: bool,
    reenable: DeferredTimer,
    dead: bool,
}

impl Default for Disruption {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl Disruption {
    pub fn new(max_hit_points: u32, freeze_hits_to_die: u32) -> Self {
        Self {
            hit_points: max_hit_points,
            max_hit_points,
            freeze_hits: 0,
            freeze_hits_to_die,
            death_grace: 1.5,
            disabled: false,
            reenable: DeferredTimer::default(),
            dead: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Dead или disabled - агент не думает и не двигается.
    pub fn is_inert(&self) -> bool {
        self.dead || self.disabled
    }

    pub fn reenable_at(&self) -> Option<f32> {
        self.reenable.deadline()
    }

    /// Freeze-хит. Достижение порога - вторая, независимая причина смерти.
    pub fn take_freeze_hit(&mut self) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }

        self.freeze_hits = self.freeze_hits.saturating_add(1);
        if self.freeze_hits >= self.freeze_hits_to_die {
            self.die();
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hit
        }
    }

    /// Отключение на `seconds`. Повторный вызов до истечения
    /// отменяет прежний таймер и ставит новый.
    pub fn disable_temporarily(&mut self, now: f32, seconds: f32) -> DisableOutcome {
        if self.dead || !seconds.is_finite() || seconds <= 0.0 {
            return DisableOutcome::Ignored;
        }

        self.reenable.arm(now, seconds);
        if self.disabled {
            DisableOutcome::Extended
        } else {
            self.disabled = true;
            DisableOutcome::Frozen
        }
    }

    /// true - агент только что включился обратно.
    pub fn tick(&mut self, now: f32) -> bool {
        if self.dead || !self.disabled {
            return false;
        }

        if self.reenable.fire(now) {
            self.disabled = false;
            return true;
        }
        false
    }

    /// Идемпотентно. true только на первом вызове.
    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }

        self.dead = true;
        self.hit_points = 0;
        self.reenable.cancel();
        true
    }
}

impl Damageable for Disruption {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.dead || amount == 0 {
            return DamageOutcome::Ignored;
        }

        self.hit_points = self.hit_points.saturating_sub(amount);
        if self.hit_points == 0 {
            self.die();
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hit
        }
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Компонент-маркер: агент мёртв (инертен до деспавна)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Dead;

/// Деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DespawnAfter {
    /// Время деспавна (секунды от старта)
    pub despawn_time: f32,
}

/// Disruption Plugin
///
/// Update (SimulationSet::Disruption):
/// 1. apply_disruption_intents - входящие TakeDamage / TakeFreezeHit / DisableTemporarily
/// 2. tick_disruption_timers - re-enable по таймеру
///
/// Update (SimulationSet::Cleanup): despawn_after_timeout
pub struct DisruptionPlugin;

impl Plugin for DisruptionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DisruptionIntent>()
            .add_event::<DisruptionEvent>();

        app.add_systems(
            Update,
            (apply_disruption_intents, tick_disruption_timers)
                .chain()
                .in_set(SimulationSet::Disruption),
        )
        .add_systems(Update, despawn_after_timeout.in_set(SimulationSet::Cleanup));
    }
}
