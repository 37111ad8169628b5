//! Combatant stats and mutable battle state for one side.
//!
//! Stats are immutable for the lifetime of a battle; only `current_health`
//! and the blocking flag change. Health is clamped to `[0, max_health]` by
//! every mutator, so no sequence of damage or heal calls can leave it outside
//! that range.

use strum::{EnumIter, IntoStaticStr};

use crate::error::RosterError;

// ============================================================================
// Side
// ============================================================================

/// Which of the two combatants an action or timer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The side on the other end of an attack.
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Fixed stat table for a combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantStats {
    pub name: String,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Probability in `[0.0, 1.0]` that an attack roll is a critical hit.
    pub crit_chance: f64,
    /// Damage scale applied to a critical roll (truncated), at least 1.0.
    pub crit_multiplier: f64,
    /// Percentage of incoming damage removed while blocking, `0..=100`.
    pub block_reduction_percent: u32,
}

impl CombatantStats {
    /// Checks the table against the combatant invariants.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.max_health == 0 {
            return Err(RosterError::ZeroMaxHealth {
                name: self.name.clone(),
            });
        }
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(RosterError::CritChanceOutOfRange {
                name: self.name.clone(),
                value: self.crit_chance,
            });
        }
        if self.crit_multiplier.is_nan() || self.crit_multiplier < 1.0 {
            return Err(RosterError::CritMultiplierTooLow {
                name: self.name.clone(),
                value: self.crit_multiplier,
            });
        }
        if self.block_reduction_percent > 100 {
            return Err(RosterError::BlockReductionOutOfRange {
                name: self.name.clone(),
                value: self.block_reduction_percent,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Combatant
// ============================================================================

/// One side of the battle: stats plus current health and blocking state.
///
/// Created once per engine and reset (not recreated) on every restart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    stats: CombatantStats,
    current_health: u32,
    is_blocking: bool,
}

impl Combatant {
    /// Creates a combatant at full health, not blocking.
    pub fn new(stats: CombatantStats) -> Result<Self, RosterError> {
        stats.validate()?;
        Ok(Self {
            current_health: stats.max_health,
            stats,
            is_blocking: false,
        })
    }

    pub fn stats(&self) -> &CombatantStats {
        &self.stats
    }

    pub fn name(&self) -> &str {
        &self.stats.name
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn is_blocking(&self) -> bool {
        self.is_blocking
    }

    pub fn block_reduction_percent(&self) -> u32 {
        self.stats.block_reduction_percent
    }

    pub fn set_blocking(&mut self, blocking: bool) {
        self.is_blocking = blocking;
    }

    /// `current = max(0, current - max(0, amount))`.
    pub fn apply_damage(&mut self, amount: i64) {
        let amount = amount.max(0);
        let remaining = i64::from(self.current_health) - amount;
        self.current_health = remaining.max(0) as u32;
    }

    /// `current = clamp(current + max(0, amount), 0, max_health)`.
    ///
    /// Dead combatants stay dead.
    pub fn apply_heal(&mut self, amount: i64) {
        if !self.is_alive() {
            return;
        }
        let healed = i64::from(self.current_health) + amount.max(0);
        self.current_health = healed.clamp(0, i64::from(self.stats.max_health)) as u32;
    }

    /// Restores full health and clears the blocking flag.
    pub fn reset(&mut self) {
        self.current_health = self.stats.max_health;
        self.is_blocking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn player() -> Combatant {
        Combatant::new(Roster::default().player).unwrap()
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = player();
        c.apply_damage(250);
        assert_eq!(c.current_health(), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut c = player();
        c.apply_damage(-40);
        assert_eq!(c.current_health(), 100);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut c = player();
        c.apply_damage(5);
        assert_eq!(c.current_health(), 95);
        c.apply_heal(18);
        assert_eq!(c.current_health(), 100);
    }

    #[test]
    fn test_heal_on_dead_is_noop() {
        let mut c = player();
        c.apply_damage(100);
        c.apply_heal(18);
        assert_eq!(c.current_health(), 0);
    }

    #[test]
    fn test_health_stays_in_bounds_for_mixed_sequence() {
        let mut c = player();
        let ops: [(bool, i64); 8] = [
            (true, 30),
            (false, 500),
            (true, -3),
            (true, 90),
            (false, 18),
            (true, 1),
            (false, -7),
            (true, 1_000),
        ];
        for (is_damage, amount) in ops {
            if is_damage {
                c.apply_damage(amount);
            } else {
                c.apply_heal(amount);
            }
            assert!(c.current_health() <= c.max_health());
        }
        assert_eq!(c.current_health(), 0);
    }

    #[test]
    fn test_reset_restores_health_and_clears_block() {
        let mut c = player();
        c.apply_damage(60);
        c.set_blocking(true);
        c.reset();
        assert_eq!(c.current_health(), 100);
        assert!(!c.is_blocking());
    }

    #[test]
    fn test_invalid_stats_rejected() {
        let mut stats = Roster::default().enemy;
        stats.crit_chance = 1.5;
        assert!(matches!(
            Combatant::new(stats),
            Err(RosterError::CritChanceOutOfRange { .. })
        ));

        let mut stats = Roster::default().enemy;
        stats.max_health = 0;
        assert!(matches!(
            Combatant::new(stats),
            Err(RosterError::ZeroMaxHealth { .. })
        ));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
        assert_eq!(Side::Enemy.as_str(), "enemy");
    }
}
