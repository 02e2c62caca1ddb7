//! Ошибки конфигурации спавна.
//!
//! Steady-state симуляция ошибок не возвращает - только spawn-time валидация.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("field `{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("field `{field}` must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("field `{field}` must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("fov_degrees must be in (0, 360], got {0}")]
    FovOutOfRange(f32),

    #[error("field `{0}` must be at least 1")]
    ZeroCount(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
