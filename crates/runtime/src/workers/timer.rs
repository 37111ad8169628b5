//! Periodic skill timer task.
//!
//! The countdown runs entirely inside the task: sleeping and decrementing
//! never touch the battle state. Only a trigger reaches the worker, as a
//! [`Command::Trigger`] intent tagged with the epoch the timer was started in.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use battle_core::{Side, SkillDefinition, SkillTimer, TimerStep};

use super::battle::Command;
use crate::api::TimerBoard;

pub(crate) struct TimerTask {
    pub epoch: u64,
    pub side: Side,
    pub skill: SkillDefinition,
    pub step: Duration,
    pub board: Arc<TimerBoard>,
    pub command_tx: mpsc::Sender<Command>,
}

impl TimerTask {
    /// Runs until aborted or the worker goes away.
    pub(crate) async fn run(self) {
        let step_ms = self.step.as_millis() as u64;
        let kind = self.skill.kind;
        let mut timer = SkillTimer::new(&self.skill);

        loop {
            tokio::time::sleep(self.step).await;

            match timer.advance(step_ms) {
                TimerStep::Counting { remaining_ms } => {
                    self.board.publish(self.epoch, self.side, kind, remaining_ms);
                }
                TimerStep::Triggered => {
                    self.board.publish(self.epoch, self.side, kind, 0);
                    trace!(
                        target: "battle::timer",
                        epoch = self.epoch,
                        side = self.side.as_str(),
                        skill = %self.skill.id,
                        "Timer triggered"
                    );

                    let intent = Command::Trigger {
                        epoch: self.epoch,
                        side: self.side,
                        kind,
                    };
                    if self.command_tx.send(intent).await.is_err() {
                        debug!(
                            target: "battle::timer",
                            skill = %self.skill.id,
                            "Worker gone, timer exiting"
                        );
                        return;
                    }
                    self.board.publish(self.epoch, self.side, kind, timer.remaining_ms());
                }
            }
        }
    }
}
