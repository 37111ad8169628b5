//! Event types for each topic.

use battle_core::{Outcome, Resolution};
use serde::{Deserialize, Serialize};

use crate::api::CombatantView;

/// A resolved skill trigger, published on [`super::Topic::Combat`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatNotice {
    /// Battle this action belongs to.
    pub epoch: u64,
    pub resolution: Resolution,
    /// Rendered log line, identical to the one appended to the battle log.
    pub line: String,
    /// Both combatants right after this action.
    pub player: CombatantView,
    pub enemy: CombatantView,
}

/// Battle lifecycle transitions, published on [`super::Topic::Lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// All timers were (re)launched from full cooldown.
    BattleStarted { epoch: u64 },
    /// A combatant reached zero health.
    BattleEnded { epoch: u64, outcome: Outcome },
    /// Timers and pending windows were cancelled.
    BattleStopped { epoch: u64 },
}
