//! Per-skill countdown state machine.
//!
//! A timer is either counting down or, for the instant its remaining time
//! hits zero, triggering. Triggering resets the countdown to the full
//! cooldown in the same step, so the caller sees a single
//! [`TimerStep::Triggered`] and the timer is already counting again.

use crate::skill::SkillDefinition;

/// What a single [`SkillTimer::advance`] call produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStep {
    Counting { remaining_ms: u64 },
    /// The bound action must run exactly once; remaining time is back at
    /// the full cooldown.
    Triggered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillTimer {
    cooldown_ms: u64,
    remaining_ms: u64,
}

impl SkillTimer {
    pub fn new(skill: &SkillDefinition) -> Self {
        Self {
            cooldown_ms: skill.cooldown_ms,
            remaining_ms: skill.cooldown_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn reset(&mut self) {
        self.remaining_ms = self.cooldown_ms;
    }

    /// Counts down by `step_ms`, saturating at zero.
    pub fn advance(&mut self, step_ms: u64) -> TimerStep {
        self.remaining_ms = self.remaining_ms.saturating_sub(step_ms);
        if self.remaining_ms == 0 {
            self.reset();
            TimerStep::Triggered
        } else {
            TimerStep::Counting {
                remaining_ms: self.remaining_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillKind;

    fn timer(cooldown_ms: u64) -> SkillTimer {
        SkillTimer::new(&SkillDefinition::new("t", SkillKind::Attack, cooldown_ms))
    }

    #[test]
    fn test_triggers_once_per_cooldown() {
        let mut t = timer(500);
        let steps: Vec<_> = (0..10).map(|_| t.advance(100)).collect();
        let triggers = steps
            .iter()
            .filter(|s| matches!(s, TimerStep::Triggered))
            .count();
        assert_eq!(triggers, 2);
        assert_eq!(steps[4], TimerStep::Triggered);
        assert_eq!(steps[5], TimerStep::Counting { remaining_ms: 400 });
    }

    #[test]
    fn test_step_larger_than_remaining_saturates() {
        let mut t = timer(250);
        assert_eq!(t.advance(100), TimerStep::Counting { remaining_ms: 150 });
        assert_eq!(t.advance(100), TimerStep::Counting { remaining_ms: 50 });
        assert_eq!(t.advance(100), TimerStep::Triggered);
        assert_eq!(t.remaining_ms(), 250);
    }

    #[test]
    fn test_reset_restores_cooldown() {
        let mut t = timer(2_200);
        assert_eq!(t.advance(1_000), TimerStep::Counting { remaining_ms: 1_200 });
        t.reset();
        assert_eq!(t.remaining_ms(), 2_200);
    }
}
