//! Per-timer remaining-time channels.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use battle_core::{Roster, Side, SkillKind};

const KINDS: [SkillKind; 4] = [
    SkillKind::Attack,
    SkillKind::Block,
    SkillKind::Heal,
    SkillKind::Special,
];

/// One `watch` channel per (side, skill), carrying remaining milliseconds.
///
/// Shared by the worker (which resets values on start) and the timer tasks
/// (which publish every tick). Channels outlive restarts, so observers
/// subscribe once.
///
/// Writes carry the epoch of the battle that issued them. Once the worker
/// moves the board to a new epoch, writes from older timer tasks are
/// discarded, even from a task that was mid-tick on another thread when it
/// was aborted.
pub struct TimerBoard {
    epoch: AtomicU64,
    player: [watch::Sender<u64>; 4],
    enemy: [watch::Sender<u64>; 4],
}

impl TimerBoard {
    pub(crate) fn new(roster: &Roster) -> Self {
        let channels =
            |side: Side| KINDS.map(|kind| watch::channel(roster.skill(side, kind).cooldown_ms).0);
        Self {
            epoch: AtomicU64::new(0),
            player: channels(Side::Player),
            enemy: channels(Side::Enemy),
        }
    }

    pub fn subscribe(&self, side: Side, kind: SkillKind) -> watch::Receiver<u64> {
        self.sender(side, kind).subscribe()
    }

    /// Latest published remaining time.
    pub fn remaining(&self, side: Side, kind: SkillKind) -> u64 {
        *self.sender(side, kind).borrow()
    }

    /// Retires every epoch before `epoch`.
    pub(crate) fn set_epoch(&self, epoch: u64) {
        self.epoch.store(epoch, Ordering::SeqCst);
    }

    /// Publishes `remaining_ms` unless `epoch` has been retired.
    ///
    /// The epoch is checked under the channel's write lock, so a stale write
    /// can only land before the worker's own reset value, never after it.
    pub(crate) fn publish(&self, epoch: u64, side: Side, kind: SkillKind, remaining_ms: u64) {
        self.sender(side, kind).send_if_modified(|current| {
            if self.epoch.load(Ordering::SeqCst) != epoch || *current == remaining_ms {
                return false;
            }
            *current = remaining_ms;
            true
        });
    }

    fn sender(&self, side: Side, kind: SkillKind) -> &watch::Sender<u64> {
        let row = match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        };
        &row[kind as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_starts_at_full_cooldown() {
        let board = TimerBoard::new(&Roster::default());
        assert_eq!(board.remaining(Side::Player, SkillKind::Attack), 2_200);
        assert_eq!(board.remaining(Side::Enemy, SkillKind::Special), 14_000);
    }

    #[test]
    fn test_publish_reaches_subscriber() {
        let board = TimerBoard::new(&Roster::default());
        let rx = board.subscribe(Side::Enemy, SkillKind::Heal);
        board.publish(0, Side::Enemy, SkillKind::Heal, 4_500);
        assert_eq!(*rx.borrow(), 4_500);
        assert_eq!(board.remaining(Side::Player, SkillKind::Heal), 8_000);
    }

    #[test]
    fn test_retired_epoch_cannot_overwrite() {
        let board = TimerBoard::new(&Roster::default());
        board.set_epoch(2);
        board.publish(2, Side::Player, SkillKind::Attack, 2_200);

        // Timer from the previous battle still ticking.
        board.publish(1, Side::Player, SkillKind::Attack, 300);
        assert_eq!(board.remaining(Side::Player, SkillKind::Attack), 2_200);

        board.publish(2, Side::Player, SkillKind::Attack, 2_100);
        assert_eq!(board.remaining(Side::Player, SkillKind::Attack), 2_100);
    }
}
