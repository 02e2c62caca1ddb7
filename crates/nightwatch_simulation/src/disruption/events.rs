//! Disruption events - входящие намерения и исходящие уведомления

use bevy::prelude::*;

/// Входящие вызовы от коллабораторов (оружие игрока, ловушки, скрипты)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DisruptionIntent {
    /// Урон (должен быть > 0)
    TakeDamage { target: Entity, amount: i32 },
    /// Попадание замораживающим оружием
    TakeFreezeHit { target: Entity },
    /// Временное отключение (секунды, > 0)
    DisableTemporarily { target: Entity, seconds: f32 },
}

impl DisruptionIntent {
    pub fn target(&self) -> Entity {
        match self {
            Self::TakeDamage { target, .. }
            | Self::TakeFreezeHit { target }
            | Self::DisableTemporarily { target, .. } => *target,
        }
    }
}

/// Исходящие события (анимация, звук, UI - на стороне коллабораторов)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum DisruptionEvent {
    Hit { entity: Entity },
    FreezeHit { entity: Entity },
    /// true - отключён, false - снова активен
    Frozen { entity: Entity, frozen: bool },
    Died { entity: Entity },
}

impl DisruptionEvent {
    pub fn entity(&self) -> Entity {
        match self {
            Self::Hit { entity }
            | Self::FreezeHit { entity }
            | Self::Frozen { entity, .. }
            | Self::Died { entity } => *entity,
        }
    }
}
