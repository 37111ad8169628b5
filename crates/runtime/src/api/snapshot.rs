//! Read-only views published to observers.

use battle_core::{Combatant, Outcome, Side};
use serde::{Deserialize, Serialize};

/// One combatant as the observer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantView {
    pub name: String,
    pub current_health: u32,
    pub max_health: u32,
    pub blocking: bool,
    /// Raised for a short window after taking damage.
    pub hit: bool,
    /// Raised for a short window after healing.
    pub healed: bool,
}

impl CombatantView {
    pub(crate) fn new(combatant: &Combatant, hit: bool, healed: bool) -> Self {
        Self {
            name: combatant.name().to_string(),
            current_health: combatant.current_health(),
            max_health: combatant.max_health(),
            blocking: combatant.is_blocking(),
            hit,
            healed,
        }
    }
}

/// Full battle state at one instant.
///
/// Published through a `watch` channel after every change; timers' remaining
/// times are published separately so ticks never touch the battle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub player: CombatantView,
    pub enemy: CombatantView,
    /// Rendered lines, newest first.
    pub log: Vec<String>,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
    /// Whether skill timers are currently scheduled.
    pub running: bool,
}

impl BattleSnapshot {
    pub fn combatant(&self, side: Side) -> &CombatantView {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// `"You Win!"`, `"You Lose!"`, or empty while the battle is undecided.
    pub fn result_text(&self) -> &'static str {
        self.outcome.map(Outcome::message).unwrap_or("")
    }
}
