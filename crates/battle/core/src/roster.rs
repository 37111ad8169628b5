//! Stat and skill tables for both sides of a battle.

use crate::combatant::{CombatantStats, Side};
use crate::error::RosterError;
use crate::skill::{SkillDefinition, SkillKind, SkillSet};

/// Everything needed to set up a battle: two stat tables and eight skills.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    pub player: CombatantStats,
    pub enemy: CombatantStats,
    pub player_skills: SkillSet,
    pub enemy_skills: SkillSet,
}

impl Roster {
    pub fn skills(&self, side: Side) -> &SkillSet {
        match side {
            Side::Player => &self.player_skills,
            Side::Enemy => &self.enemy_skills,
        }
    }

    pub fn skill(&self, side: Side, kind: SkillKind) -> &SkillDefinition {
        self.skills(side).get(kind)
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        self.player.validate()?;
        self.enemy.validate()?;
        self.player_skills.validate()?;
        self.enemy_skills.validate()
    }

    /// First log line of every battle.
    pub fn opening_message(&self) -> String {
        format!("A wild {} appears! Battle starts.", self.enemy.name)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            player: CombatantStats {
                name: "Player".to_string(),
                max_health: 100,
                attack: 20,
                defense: 8,
                crit_chance: 0.15,
                crit_multiplier: 1.6,
                block_reduction_percent: 50,
            },
            enemy: CombatantStats {
                name: "Slime".to_string(),
                max_health: 110,
                attack: 18,
                defense: 6,
                crit_chance: 0.10,
                crit_multiplier: 1.5,
                block_reduction_percent: 50,
            },
            player_skills: SkillSet {
                attack: SkillDefinition::new("p_attack", SkillKind::Attack, 2_200),
                block: SkillDefinition::new("p_block", SkillKind::Block, 6_000).with_duration(2_000),
                heal: SkillDefinition::new("p_heal", SkillKind::Heal, 8_000),
                special: SkillDefinition::new("p_special", SkillKind::Special, 12_000),
            },
            enemy_skills: SkillSet {
                attack: SkillDefinition::new("e_attack", SkillKind::Attack, 2_000),
                block: SkillDefinition::new("e_block", SkillKind::Block, 7_000).with_duration(1_800),
                heal: SkillDefinition::new("e_heal", SkillKind::Heal, 9_000),
                special: SkillDefinition::new("e_special", SkillKind::Special, 14_000),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_is_valid() {
        let roster = Roster::default();
        assert!(roster.validate().is_ok());
        assert_eq!(roster.skill(Side::Enemy, SkillKind::Block).duration_ms, 1_800);
        assert_eq!(roster.skill(Side::Player, SkillKind::Attack).cooldown_ms, 2_200);
        assert_eq!(roster.skill(Side::Player, SkillKind::Special).name, "Special");
    }

    #[test]
    fn test_opening_message_names_enemy() {
        assert_eq!(
            Roster::default().opening_message(),
            "A wild Slime appears! Battle starts."
        );
    }

    #[test]
    fn test_zero_cooldown_rejected() {
        let mut roster = Roster::default();
        roster.enemy_skills.heal.cooldown_ms = 0;
        assert_eq!(
            roster.validate(),
            Err(RosterError::ZeroCooldown {
                id: "e_heal".to_string()
            })
        );
    }

    #[test]
    fn test_misplaced_skill_rejected() {
        let mut roster = Roster::default();
        roster.player_skills.heal = SkillDefinition::new("p_heal", SkillKind::Special, 8_000);
        assert!(matches!(
            roster.validate(),
            Err(RosterError::SkillKindMismatch {
                expected: SkillKind::Heal,
                found: SkillKind::Special,
                ..
            })
        ));
    }
}
