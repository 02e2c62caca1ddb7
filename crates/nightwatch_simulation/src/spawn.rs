//! Спавн агентов: bundle builders + таблица стартовых точек
//!
//! Все builders валидируют `SpawnConfig` и возвращают `ConfigResult`.

use bevy::prelude::*;

use crate::components::{Detectable, Facing, Position};
use crate::config::SpawnConfig;
use crate::error::ConfigResult;
use crate::layers::LAYER_ENEMIES;

/// Тип агента в точке спавна
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Guard,
    Sentry,
}

/// Точка спавна
#[derive(Debug, Clone)]
pub struct SpawnPoint {
    pub kind: SpawnKind,
    pub position: Vec2,
    pub config: SpawnConfig,
    /// false → точка только описана, спавнит её скрипт уровня
    pub spawn_on_start: bool,
}

impl SpawnPoint {
    pub fn guard(position: Vec2, config: SpawnConfig) -> Self {
        Self {
            kind: SpawnKind::Guard,
            position,
            config,
            spawn_on_start: true,
        }
    }

    pub fn sentry(position: Vec2, config: SpawnConfig) -> Self {
        Self {
            kind: SpawnKind::Sentry,
            position,
            config,
            spawn_on_start: true,
        }
    }
}

/// Таблица стартовых точек уровня
#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnTable {
    pub points: Vec<SpawnPoint>,
}

/// Полный набор компонентов guard'а
pub fn guard_bundle(position: Vec2, config: &SpawnConfig) -> ConfigResult<impl Bundle> {
    config.validate()?;

    Ok((
        Position(position),
        Facing::default(),
        config.perceiver(),
        config.patrol_mover(position),
        config.pursuit_agent(),
        config.disruption(),
        config.contact_damage(),
        Detectable::new(LAYER_ENEMIES, config.body_radius),
    ))
}

/// Полный набор компонентов sentry (без Detectable - sentry не тело)
pub fn sentry_bundle(position: Vec2, config: &SpawnConfig) -> ConfigResult<impl Bundle> {
    config.validate()?;

    Ok((
        Position(position),
        config.perceiver(),
        config.sentry(),
        config.disruption(),
    ))
}

pub fn spawn_guard(commands: &mut Commands, position: Vec2, config: &SpawnConfig) -> ConfigResult<Entity> {
    let bundle = guard_bundle(position, config)?;
    Ok(commands.spawn(bundle).id())
}

pub fn spawn_sentry(commands: &mut Commands, position: Vec2, config: &SpawnConfig) -> ConfigResult<Entity> {
    let bundle = sentry_bundle(position, config)?;
    Ok(commands.spawn(bundle).id())
}

/// Startup система: спавн точек с `spawn_on_start`
///
/// Невалидная точка логируется и пропускается, остальные спавнятся.
pub fn spawn_from_table(mut commands: Commands, table: Option<Res<SpawnTable>>) {
    let Some(table) = table else {
        return;
    };

    for point in table.points.iter().filter(|p| p.spawn_on_start) {
        let spawned = match point.kind {
            SpawnKind::Guard => spawn_guard(&mut commands, point.position, &point.config),
            SpawnKind::Sentry => spawn_sentry(&mut commands, point.position, &point.config),
        };

        match spawned {
            Ok(entity) => crate::logger::log(&format!(
                "✅ Spawned {:?} {:?} at {:?}",
                point.kind, entity, point.position
            )),
            Err(error) => crate::logger::log_error(&format!(
                "Spawn point {:?} at {:?} rejected: {}",
                point.kind, point.position, error
            )),
        }
    }
}
