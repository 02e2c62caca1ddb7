//! ECS Components общие для всех агентов
//!
//! Организация по доменам:
//! - world: позиционирование (Position, Facing) + угловая геометрия
//! - agent: участие в world-запросах (Detectable)
//!
//! Доменные компоненты живут рядом со своей логикой:
//! - vision::Perceiver, patrol::PatrolMover, disruption::Disruption
//! - ai::PursuitAgent, ai::Sentry, combat::ContactDamage

pub mod agent;
pub mod world;

// Re-exports для удобного импорта
pub use agent::*;
pub use world::*;
