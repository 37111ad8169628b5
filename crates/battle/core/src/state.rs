//! Authoritative battle state and the single action resolver.
//!
//! [`BattleState`] holds both combatants, the bounded log and the terminal
//! outcome. Every mutation goes through [`BattleState::perform`] (skill
//! triggers) or [`BattleState::end_block`] (block window expiry); the runtime
//! serializes those calls, so this type needs no interior locking.

use rand::Rng;

use crate::combatant::{Combatant, Side};
use crate::error::RosterError;
use crate::event::{CombatEvent, Outcome};
use crate::log::BattleLog;
use crate::resolver::{
    apply_block_mitigation, apply_special_multiplier, compute_attack_damage, heal_amount,
};
use crate::roster::Roster;
use crate::skill::{SkillDefinition, SkillKind};

/// What one successful [`BattleState::perform`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub actor: Side,
    pub kind: SkillKind,
    pub event: CombatEvent,
    /// Set when this action ended the battle.
    pub ended: Option<Outcome>,
}

impl Resolution {
    /// Side whose health or blocking state this action changed.
    pub fn target(&self) -> Side {
        if self.kind.deals_damage() {
            self.actor.opponent()
        } else {
            self.actor
        }
    }
}

#[derive(Clone, Debug)]
pub struct BattleState {
    player: Combatant,
    enemy: Combatant,
    log: BattleLog,
    outcome: Option<Outcome>,
    opening: String,
}

impl BattleState {
    /// Builds a fresh battle from `roster`, with the log seeded.
    pub fn new(roster: &Roster, log_capacity: usize) -> Result<Self, RosterError> {
        roster.validate()?;
        let mut state = Self {
            player: Combatant::new(roster.player.clone())?,
            enemy: Combatant::new(roster.enemy.clone())?,
            log: BattleLog::with_capacity(log_capacity),
            outcome: None,
            opening: roster.opening_message(),
        };
        state.reset();
        Ok(state)
    }

    /// Back to full health, no blocking, log holding only the opening line.
    pub fn reset(&mut self) {
        self.player.reset();
        self.enemy.reset();
        self.outcome = None;
        self.log.restart(self.opening.clone());
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Runs the action bound to `skill` for `actor`.
    ///
    /// Returns `None` when nothing happened: the battle is over, or the
    /// combatants the action needs are already dead.
    pub fn perform<R: Rng + ?Sized>(
        &mut self,
        actor: Side,
        skill: &SkillDefinition,
        rng: &mut R,
    ) -> Option<Resolution> {
        if self.is_game_over() {
            return None;
        }

        let event = match skill.kind {
            SkillKind::Attack => self.attack(actor, false, rng)?,
            SkillKind::Special => self.attack(actor, true, rng)?,
            SkillKind::Heal => self.heal(actor)?,
            SkillKind::Block => self.block(actor, skill.duration_ms)?,
        };
        self.log.push(event.to_string());

        let ended = if skill.kind.deals_damage() {
            self.check_game_end()
        } else {
            None
        };

        Some(Resolution {
            actor,
            kind: skill.kind,
            event,
            ended,
        })
    }

    /// Lowers the blocking flag when a block window closes.
    pub fn end_block(&mut self, side: Side) {
        self.combatant_mut(side).set_blocking(false);
    }

    fn attack<R: Rng + ?Sized>(
        &mut self,
        actor: Side,
        is_special: bool,
        rng: &mut R,
    ) -> Option<CombatEvent> {
        let defender_side = actor.opponent();
        let (attacker, defender) = (self.combatant(actor), self.combatant(defender_side));
        if !attacker.is_alive() || !defender.is_alive() {
            return None;
        }

        let roll = compute_attack_damage(attacker.stats(), defender.stats(), rng);
        let raw_damage = if is_special {
            apply_special_multiplier(roll.amount)
        } else {
            roll.amount
        };
        let final_damage = apply_block_mitigation(raw_damage, defender);

        let attacker_name = attacker.name().to_string();
        let defender_name = defender.name().to_string();
        self.combatant_mut(defender_side)
            .apply_damage(i64::from(final_damage));

        Some(if is_special {
            CombatEvent::Special {
                attacker: attacker_name,
                defender: defender_name,
                final_damage,
                is_crit: roll.is_crit,
            }
        } else {
            CombatEvent::Attack {
                attacker: attacker_name,
                defender: defender_name,
                raw_damage,
                final_damage,
                is_crit: roll.is_crit,
            }
        })
    }

    fn heal(&mut self, side: Side) -> Option<CombatEvent> {
        let target = self.combatant_mut(side);
        if !target.is_alive() {
            return None;
        }
        let amount = heal_amount(target.max_health());
        target.apply_heal(i64::from(amount));
        Some(CombatEvent::Heal {
            target: target.name().to_string(),
            amount,
        })
    }

    fn block(&mut self, side: Side, duration_ms: u64) -> Option<CombatEvent> {
        let target = self.combatant_mut(side);
        if !target.is_alive() {
            return None;
        }
        target.set_blocking(true);
        Some(CombatEvent::Block {
            target: target.name().to_string(),
            duration_ms,
            reduction_percent: target.block_reduction_percent(),
        })
    }

    /// Records the outcome once either side is at zero health.
    ///
    /// A player at zero loses even if the enemy is also at zero.
    fn check_game_end(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        let outcome = if !self.player.is_alive() {
            Outcome::Defeat
        } else if !self.enemy.is_alive() {
            Outcome::Victory
        } else {
            return None;
        };
        self.outcome = Some(outcome);
        self.log.push(outcome.message());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::DEFAULT_LOG_CAPACITY;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn no_crit_roster() -> Roster {
        let mut roster = Roster::default();
        roster.player.crit_chance = 0.0;
        roster.enemy.crit_chance = 0.0;
        roster
    }

    fn state(roster: &Roster) -> BattleState {
        BattleState::new(roster, DEFAULT_LOG_CAPACITY).unwrap()
    }

    #[test]
    fn test_new_state_seeds_log() {
        let s = state(&Roster::default());
        assert_eq!(s.log().to_vec(), vec!["A wild Slime appears! Battle starts."]);
        assert!(!s.is_game_over());
        assert_eq!(s.combatant(Side::Enemy).current_health(), 110);
    }

    #[test]
    fn test_unblocked_attack_logs_without_suffix() {
        let roster = no_crit_roster();
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(3);

        let res = s
            .perform(Side::Player, &roster.player_skills.attack, &mut rng)
            .unwrap();
        let CombatEvent::Attack {
            raw_damage,
            final_damage,
            is_crit,
            ..
        } = res.event
        else {
            panic!("expected attack event, got {:?}", res.event);
        };

        assert_eq!(raw_damage, final_damage);
        assert!(!is_crit);
        // base in [10, 20], enemy defense 6 removes 3
        assert!((7..=17).contains(&final_damage));
        assert_eq!(s.combatant(Side::Enemy).current_health(), 110 - final_damage);
        assert_eq!(
            s.log().latest(),
            Some(format!("Player attacks Slime for {final_damage} dmg").as_str())
        );
        assert_eq!(res.target(), Side::Enemy);
    }

    #[test]
    fn test_blocked_attack_marks_line() {
        let roster = no_crit_roster();
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(11);

        s.perform(Side::Enemy, &roster.enemy_skills.block, &mut rng)
            .unwrap();
        assert!(s.combatant(Side::Enemy).is_blocking());

        let res = s
            .perform(Side::Player, &roster.player_skills.attack, &mut rng)
            .unwrap();
        let CombatEvent::Attack {
            raw_damage,
            final_damage,
            ..
        } = res.event
        else {
            panic!("expected attack event");
        };
        assert_eq!(final_damage, (raw_damage * 50 + 50) / 100);
        assert!(s.log().latest().unwrap().ends_with(" [blocked]"));
    }

    #[test]
    fn test_block_then_end_block() {
        let roster = Roster::default();
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(0);

        let res = s
            .perform(Side::Player, &roster.player_skills.block, &mut rng)
            .unwrap();
        assert_eq!(res.target(), Side::Player);
        assert_eq!(
            s.log().latest(),
            Some("Player is blocking (50% for 2000ms)")
        );
        s.end_block(Side::Player);
        assert!(!s.combatant(Side::Player).is_blocking());
    }

    #[test]
    fn test_heal_clamps_and_logs_full_amount() {
        let roster = no_crit_roster();
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(5);

        s.perform(Side::Enemy, &roster.enemy_skills.attack, &mut rng)
            .unwrap();
        let res = s
            .perform(Side::Player, &roster.player_skills.heal, &mut rng)
            .unwrap();
        assert_eq!(
            res.event,
            CombatEvent::Heal {
                target: "Player".into(),
                amount: 18
            }
        );
        assert_eq!(s.combatant(Side::Player).current_health(), 100);
    }

    #[test]
    fn test_lethal_attack_ends_battle_once() {
        let mut roster = no_crit_roster();
        roster.enemy.max_health = 1;
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(9);

        let res = s
            .perform(Side::Player, &roster.player_skills.special, &mut rng)
            .unwrap();
        assert_eq!(res.ended, Some(Outcome::Victory));
        assert_eq!(s.outcome(), Some(Outcome::Victory));
        assert_eq!(s.log().latest(), Some("You Win!"));

        let log_len = s.log().len();
        assert!(
            s.perform(Side::Enemy, &roster.enemy_skills.attack, &mut rng)
                .is_none()
        );
        assert!(
            s.perform(Side::Player, &roster.player_skills.attack, &mut rng)
                .is_none()
        );
        assert_eq!(s.log().len(), log_len);
        assert_eq!(s.log().iter().filter(|l| *l == "You Win!").count(), 1);
    }

    #[test]
    fn test_enemy_kill_is_defeat() {
        let mut roster = no_crit_roster();
        roster.player.max_health = 1;
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(2);

        let res = s
            .perform(Side::Enemy, &roster.enemy_skills.attack, &mut rng)
            .unwrap();
        assert_eq!(res.ended, Some(Outcome::Defeat));
        assert_eq!(s.log().latest(), Some("You Lose!"));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut roster = no_crit_roster();
        roster.enemy.max_health = 1;
        let mut s = state(&roster);
        let mut rng = StdRng::seed_from_u64(4);

        s.perform(Side::Enemy, &roster.enemy_skills.block, &mut rng);
        s.perform(Side::Player, &roster.player_skills.attack, &mut rng);
        assert!(s.is_game_over());

        s.reset();
        assert!(!s.is_game_over());
        assert_eq!(s.combatant(Side::Enemy).current_health(), 1);
        assert_eq!(s.combatant(Side::Player).current_health(), 100);
        assert!(!s.combatant(Side::Enemy).is_blocking());
        assert_eq!(s.log().len(), 1);
    }
}
