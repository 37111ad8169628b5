//! Public engine API surface.
//!
//! This module gathers the types exposed to observers of the engine so other
//! layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod snapshot;
pub mod timers;

pub use errors::{EngineError, Result};
pub use handle::BattleHandle;
pub use snapshot::{BattleSnapshot, CombatantView};
pub use timers::TimerBoard;
