//! Worker tasks that back the battle engine.
//!
//! The battle worker owns all mutable state; skill timers and short-lived
//! window tasks feed it intents over the command channel.

mod battle;
mod metrics;
mod tasks;
mod timer;

pub use battle::{BattleWorker, Command};
pub(crate) use battle::WorkerOutputs;
pub use metrics::EngineMetrics;
