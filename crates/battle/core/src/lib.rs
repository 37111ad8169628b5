//! Rules and data types for a two-sided, timer-driven battle.
//!
//! `battle-core` is synchronous and free of I/O. It defines the combatants,
//! skill tables, damage/heal formulas, the skill countdown state machine and
//! the [`BattleState`] that all mutations flow through. The runtime crate
//! drives these types from concurrent timer tasks and serializes every call
//! into [`BattleState`].
pub mod combatant;
pub mod error;
pub mod event;
pub mod log;
pub mod resolver;
pub mod roster;
pub mod skill;
pub mod state;
pub mod timer;

pub use combatant::{Combatant, CombatantStats, Side};
pub use error::RosterError;
pub use event::{CombatEvent, Outcome};
pub use log::{BattleLog, DEFAULT_LOG_CAPACITY};
pub use resolver::{
    DamageRoll, HEAL_PERCENT, apply_block_mitigation, apply_special_multiplier,
    compute_attack_damage, heal_amount,
};
pub use roster::Roster;
pub use skill::{SkillDefinition, SkillKind, SkillSet};
pub use state::{BattleState, Resolution};
pub use timer::{SkillTimer, TimerStep};
