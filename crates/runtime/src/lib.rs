//! Concurrent battle engine built on `battle-core`.
//!
//! This crate runs eight independent skill timers against a single battle
//! worker that owns all mutable state. Observers embed [`BattleEngine`] and
//! interact with it through [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the engine and its builder
//! - [`api`] exposes the types observers interact with
//! - [`events`] provides the topic-based event bus
//! - [`config`] holds timing and buffer settings
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod engine;
pub mod events;

mod workers;

pub use api::{BattleHandle, BattleSnapshot, CombatantView, EngineError, Result, TimerBoard};
pub use config::{ConfigError, EngineConfig};
pub use engine::{BattleEngine, BattleEngineBuilder};
pub use events::{CombatNotice, Event, EventBus, LifecycleEvent, Topic};
pub use workers::EngineMetrics;
