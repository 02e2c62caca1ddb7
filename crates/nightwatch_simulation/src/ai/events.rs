//! AI Events - исходящие уведомления state machines
//!
//! Анимация, звук, UI, реакция соседей - на стороне коллабораторов.

use bevy::prelude::*;

use crate::ai::PursuitState;

/// Guard сменил pursuit-состояние
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PursuitChanged {
    pub agent: Entity,
    pub from: PursuitState,
    pub to: PursuitState,
}

/// Sentry поднял тревогу (один раз на каждый Track с удержанием цели)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AlarmTriggered {
    /// Entity sentry
    pub sentry: Entity,
    /// Позиция sentry на момент тревоги
    pub origin: Vec2,
    /// Кого засекли
    pub target: Entity,
    /// Враги в notify_radius (одноразовый broadcast, без самого sentry)
    pub notified: Vec<Entity>,
}
