//! Combat events and their rendered log lines.
//!
//! Each resolved action produces exactly one [`CombatEvent`]. The `Display`
//! implementations are the log-line contract the observer renders verbatim.

use std::fmt;

/// Outcome of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// A regular attack landed.
    ///
    /// `raw_damage` is the rolled amount before block mitigation;
    /// `final_damage` is what was subtracted from the defender.
    Attack {
        attacker: String,
        defender: String,
        raw_damage: u32,
        final_damage: u32,
        is_crit: bool,
    },
    /// A special attack landed (rolled like an attack, scaled by 1.5).
    Special {
        attacker: String,
        defender: String,
        final_damage: u32,
        is_crit: bool,
    },
    Heal {
        target: String,
        amount: u32,
    },
    Block {
        target: String,
        duration_ms: u64,
        reduction_percent: u32,
    },
}

impl CombatEvent {
    /// Damage subtracted from the defender, if this event dealt any.
    pub fn damage_dealt(&self) -> Option<u32> {
        match self {
            CombatEvent::Attack { final_damage, .. } | CombatEvent::Special { final_damage, .. } => {
                Some(*final_damage)
            }
            CombatEvent::Heal { .. } | CombatEvent::Block { .. } => None,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Attack {
                attacker,
                defender,
                raw_damage,
                final_damage,
                is_crit,
            } => {
                write!(f, "{attacker} attacks {defender} for {final_damage} dmg")?;
                if *is_crit {
                    f.write_str(" (CRIT!)")?;
                }
                if final_damage < raw_damage {
                    f.write_str(" [blocked]")?;
                }
                Ok(())
            }
            CombatEvent::Special {
                attacker,
                defender,
                final_damage,
                is_crit,
            } => {
                write!(f, "{attacker} uses SPECIAL on {defender} for {final_damage} dmg")?;
                if *is_crit {
                    f.write_str(" (CRIT!)")?;
                }
                Ok(())
            }
            CombatEvent::Heal { target, amount } => write!(f, "{target} heals {amount} HP"),
            CombatEvent::Block {
                target,
                duration_ms,
                reduction_percent,
            } => write!(
                f,
                "{target} is blocking ({reduction_percent}% for {duration_ms}ms)"
            ),
        }
    }
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The enemy reached zero health.
    Victory,
    /// The player reached zero health.
    Defeat,
}

impl Outcome {
    pub const fn message(self) -> &'static str {
        match self {
            Outcome::Victory => "You Win!",
            Outcome::Defeat => "You Lose!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(raw: u32, fin: u32, crit: bool) -> CombatEvent {
        CombatEvent::Attack {
            attacker: "Player".into(),
            defender: "Slime".into(),
            raw_damage: raw,
            final_damage: fin,
            is_crit: crit,
        }
    }

    #[test]
    fn test_plain_attack_line() {
        assert_eq!(attack(12, 12, false).to_string(), "Player attacks Slime for 12 dmg");
    }

    #[test]
    fn test_attack_line_suffix_order() {
        assert_eq!(
            attack(24, 12, true).to_string(),
            "Player attacks Slime for 12 dmg (CRIT!) [blocked]"
        );
        assert_eq!(
            attack(24, 12, false).to_string(),
            "Player attacks Slime for 12 dmg [blocked]"
        );
    }

    #[test]
    fn test_special_line_never_marks_blocked() {
        let event = CombatEvent::Special {
            attacker: "Slime".into(),
            defender: "Player".into(),
            final_damage: 9,
            is_crit: true,
        };
        assert_eq!(event.to_string(), "Slime uses SPECIAL on Player for 9 dmg (CRIT!)");
        assert_eq!(event.damage_dealt(), Some(9));
    }

    #[test]
    fn test_heal_and_block_lines() {
        let heal = CombatEvent::Heal {
            target: "Player".into(),
            amount: 18,
        };
        assert_eq!(heal.to_string(), "Player heals 18 HP");
        assert_eq!(heal.damage_dealt(), None);

        let block = CombatEvent::Block {
            target: "Slime".into(),
            duration_ms: 1_800,
            reduction_percent: 50,
        };
        assert_eq!(block.to_string(), "Slime is blocking (50% for 1800ms)");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Outcome::Victory.to_string(), "You Win!");
        assert_eq!(Outcome::Defeat.to_string(), "You Lose!");
    }
}
