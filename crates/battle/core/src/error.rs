//! Validation errors for stat and skill tables.
//!
//! The simulation itself never fails: out-of-range health is clamped and
//! actions against dead combatants are no-ops. Errors only arise when a roster
//! is assembled from tables that break the combatant or skill invariants.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("{name}: max health must be positive")]
    ZeroMaxHealth { name: String },

    #[error("{name}: crit chance {value} outside [0.0, 1.0]")]
    CritChanceOutOfRange { name: String, value: f64 },

    #[error("{name}: crit multiplier {value} below 1.0")]
    CritMultiplierTooLow { name: String, value: f64 },

    #[error("{name}: block reduction {value}% exceeds 100%")]
    BlockReductionOutOfRange { name: String, value: u32 },

    #[error("skill {id}: cooldown must be positive")]
    ZeroCooldown { id: String },

    #[error("skill {id}: expected kind {expected:?}, table has {found:?}")]
    SkillKindMismatch {
        id: String,
        expected: crate::skill::SkillKind,
        found: crate::skill::SkillKind,
    },
}
