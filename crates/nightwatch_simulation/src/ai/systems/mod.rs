//! AI systems (perception + FSM + movement)

pub mod movement;
pub mod pursuit;
pub mod sentry;

// Re-export all systems
pub use movement::*;
pub use pursuit::*;
pub use sentry::*;
