//! Topic-based event bus for battle events.
//!
//! Combat results and lifecycle transitions are published to separate topics
//! so observers subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatNotice, LifecycleEvent};
