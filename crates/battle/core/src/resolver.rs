//! Damage, heal and mitigation formulas.
//!
//! # Formula
//!
//! ```text
//! base      = uniform[attack / 2, attack]
//! scaled    = crit ? trunc(base * crit_multiplier) : base
//! mitigated = max(1, scaled - defense / 2)
//!
//! special   = round(mitigated * 1.5)
//! blocked   = round(amount * (100 - block_reduction) / 100)
//! heal      = round(max_health * 18 / 100)
//! ```
//!
//! Every "round" is round-half-up, done in integer arithmetic so results do
//! not depend on float formatting. The only randomness is the uniform base
//! draw and the Bernoulli crit draw, both taken from the caller's RNG.

use rand::Rng;

use crate::combatant::{Combatant, CombatantStats};

/// Percentage of max health restored by a heal.
pub const HEAL_PERCENT: u32 = 18;

/// Result of one attack roll against a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    /// Uniform draw before crit scaling and defense.
    pub base: u32,
    /// Damage after crit scaling and defense, at least 1.
    pub amount: u32,
    pub is_crit: bool,
}

/// Rolls attack damage from `attacker` against `defender`.
pub fn compute_attack_damage<R: Rng + ?Sized>(
    attacker: &CombatantStats,
    defender: &CombatantStats,
    rng: &mut R,
) -> DamageRoll {
    let base = rng.gen_range(attacker.attack / 2..=attacker.attack);
    let is_crit = rng.r#gen::<f64>() < attacker.crit_chance;
    let scaled = if is_crit {
        (f64::from(base) * attacker.crit_multiplier) as u32
    } else {
        base
    };
    let amount = scaled.saturating_sub(defender.defense / 2).max(1);

    DamageRoll {
        base,
        amount,
        is_crit,
    }
}

/// Scales an already-rolled amount by 1.5 for the special skill.
pub fn apply_special_multiplier(amount: u32) -> u32 {
    (amount * 3).div_ceil(2)
}

/// Removes the defender's block reduction from `amount` while it is blocking.
pub fn apply_block_mitigation(amount: u32, defender: &Combatant) -> u32 {
    if !defender.is_blocking() {
        return amount;
    }
    let keep = 100 - defender.block_reduction_percent().min(100);
    (amount * keep + 50) / 100
}

/// Amount a heal restores for a combatant with `max_health`.
pub fn heal_amount(max_health: u32) -> u32 {
    (max_health * HEAL_PERCENT + 50) / 100
}
