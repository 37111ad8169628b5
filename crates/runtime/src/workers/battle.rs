//! Battle worker that owns the authoritative [`BattleState`].
//!
//! Every mutation of combatants, the log or the game-over flag happens here,
//! one command at a time. Skill timers and window tasks never touch state
//! directly; they send intents tagged with the epoch they were spawned in, and
//! intents from an earlier epoch are dropped. A stop bumps the epoch before it
//! returns, so an intent already queued behind the stop can never apply.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, trace, warn};

use battle_core::{BattleState, Outcome, Resolution, Roster, Side, SkillKind};

use super::metrics::EngineMetrics;
use super::tasks::TaskTracker;
use super::timer::TimerTask;
use crate::api::{BattleSnapshot, CombatantView, TimerBoard};
use crate::config::EngineConfig;
use crate::events::{CombatNotice, Event, EventBus, LifecycleEvent};

/// Commands that can be sent to the battle worker
pub enum Command {
    /// Reset state and launch all skill timers. Replies with the new epoch.
    Start { reply: oneshot::Sender<u64> },
    /// Cancel timers and pending windows. Replies whether a battle was running.
    Stop { reply: oneshot::Sender<bool> },
    /// A skill timer reached zero.
    Trigger {
        epoch: u64,
        side: Side,
        kind: SkillKind,
    },
    /// Run a skill's action now, outside its timer.
    Force {
        side: Side,
        kind: SkillKind,
        reply: oneshot::Sender<Option<Resolution>>,
    },
    /// A block or flash window elapsed.
    CloseWindow {
        epoch: u64,
        side: Side,
        window: Window,
        seq: u64,
    },
    /// Stop everything and exit the worker loop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Timed flags raised by an action and lowered by a delayed intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Block,
    Hit,
    Heal,
}

#[derive(Debug, Default, Clone, Copy)]
struct WindowSlot {
    open: bool,
    /// Bumped on every open; a close only applies to the latest open.
    seq: u64,
}

#[derive(Debug, Default)]
struct SideWindows {
    block: WindowSlot,
    hit: WindowSlot,
    heal: WindowSlot,
}

impl SideWindows {
    fn slot_mut(&mut self, window: Window) -> &mut WindowSlot {
        match window {
            Window::Block => &mut self.block,
            Window::Hit => &mut self.hit,
            Window::Heal => &mut self.heal,
        }
    }
}

#[derive(Debug, Default)]
struct PerSide<T> {
    player: T,
    enemy: T,
}

impl<T> PerSide<T> {
    fn get(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}

/// Shared outputs the worker publishes to.
pub(crate) struct WorkerOutputs {
    pub timers: Arc<TimerBoard>,
    pub event_bus: EventBus,
    pub metrics: Arc<EngineMetrics>,
}

/// Background task that serializes every battle mutation.
pub struct BattleWorker {
    roster: Roster,
    config: EngineConfig,
    state: BattleState,
    rng: StdRng,
    epoch: u64,
    running: bool,
    windows: PerSide<SideWindows>,
    tasks: TaskTracker,
    command_rx: mpsc::Receiver<Command>,
    /// Weak so that the channel closes once every handle and task is gone.
    command_tx: mpsc::WeakSender<Command>,
    snapshot_tx: watch::Sender<BattleSnapshot>,
    outputs: WorkerOutputs,
}

impl BattleWorker {
    /// Creates a new battle worker in the stopped state.
    pub(crate) fn new(
        roster: Roster,
        config: EngineConfig,
        state: BattleState,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::WeakSender<Command>,
        outputs: WorkerOutputs,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let windows = PerSide::default();
        let (snapshot_tx, _) = watch::channel(compose_snapshot(&state, &windows, false));

        Self {
            roster,
            config,
            state,
            rng,
            epoch: 0,
            running: false,
            windows,
            tasks: TaskTracker::default(),
            command_rx,
            command_tx,
            snapshot_tx,
            outputs,
        }
    }

    pub(crate) fn subscribe_snapshots(&self) -> watch::Receiver<BattleSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if self.handle_command(cmd).is_break() {
                        break;
                    }
                }
                else => break,
            }
        }
        self.stop();
        debug!(target: "battle::worker", "Battle worker exited");
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Start { reply } => {
                let epoch = self.start();
                if reply.send(epoch).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Stop { reply } => {
                let was_running = self.stop();
                if reply.send(was_running).is_err() {
                    debug!("Stop reply channel closed (caller dropped)");
                }
            }
            Command::Trigger { epoch, side, kind } => {
                if self.is_current(epoch) {
                    self.resolve(side, kind);
                }
            }
            Command::Force { side, kind, reply } => {
                let resolution = self.resolve(side, kind);
                if reply.send(resolution).is_err() {
                    debug!("Force reply channel closed (caller dropped)");
                }
            }
            Command::CloseWindow {
                epoch,
                side,
                window,
                seq,
            } => {
                if self.is_current(epoch) {
                    self.close_window(side, window, seq);
                }
            }
            Command::Shutdown { reply } => {
                self.stop();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn is_current(&self, epoch: u64) -> bool {
        if epoch == self.epoch {
            return true;
        }
        trace!(
            target: "battle::worker",
            intent_epoch = epoch,
            current_epoch = self.epoch,
            "Dropping stale intent"
        );
        self.outputs.metrics.record_stale();
        false
    }

    /// Resets the battle and launches all eight skill timers.
    ///
    /// Always stops first, so calling it on a running battle cannot leak tasks.
    fn start(&mut self) -> u64 {
        self.stop();
        self.state.reset();
        self.windows = PerSide::default();

        let Some(command_tx) = self.command_tx.upgrade() else {
            warn!(target: "battle::worker", "No command senders left, battle not started");
            self.publish_snapshot();
            return self.epoch;
        };

        for side in Side::iter() {
            for kind in SkillKind::iter() {
                let skill = self.roster.skill(side, kind).clone();
                self.outputs
                    .timers
                    .publish(self.epoch, side, kind, skill.cooldown_ms);
                let task = TimerTask {
                    epoch: self.epoch,
                    side,
                    skill,
                    step: self.config.tick(),
                    board: Arc::clone(&self.outputs.timers),
                    command_tx: command_tx.clone(),
                };
                self.tasks.spawn_timer(task.run());
            }
        }

        self.running = true;
        self.outputs.metrics.record_started();
        info!(
            target: "battle::worker",
            epoch = self.epoch,
            timers = self.tasks.timer_count(),
            "Battle started"
        );
        self.outputs
            .event_bus
            .publish(Event::Lifecycle(LifecycleEvent::BattleStarted {
                epoch: self.epoch,
            }));
        self.publish_snapshot();
        self.epoch
    }

    /// Cancels every timer and window task and retires the current epoch.
    ///
    /// Returns whether a battle was running. A second call finds nothing to
    /// cancel and publishes nothing.
    fn stop(&mut self) -> bool {
        let aborted = self.tasks.abort_all();
        let stopped_epoch = self.epoch;
        self.epoch = self.epoch.wrapping_add(1);
        self.outputs.timers.set_epoch(self.epoch);

        if !std::mem::replace(&mut self.running, false) {
            return false;
        }

        for side in Side::iter() {
            let windows = self.windows.get_mut(side);
            windows.hit.open = false;
            windows.heal.open = false;
        }

        info!(
            target: "battle::worker",
            epoch = stopped_epoch,
            aborted,
            "Battle stopped"
        );
        self.outputs
            .event_bus
            .publish(Event::Lifecycle(LifecycleEvent::BattleStopped {
                epoch: stopped_epoch,
            }));
        self.publish_snapshot();
        true
    }

    fn resolve(&mut self, side: Side, kind: SkillKind) -> Option<Resolution> {
        if !self.running {
            self.outputs.metrics.record_ignored();
            return None;
        }

        let skill = self.roster.skill(side, kind);
        let Some(resolution) = self.state.perform(side, skill, &mut self.rng) else {
            self.outputs.metrics.record_ignored();
            return None;
        };
        self.outputs.metrics.record_resolved();

        let line = resolution.event.to_string();
        debug!(
            target: "battle::worker",
            epoch = self.epoch,
            side = side.as_str(),
            skill = kind.as_str(),
            damage = ?resolution.event.damage_dealt(),
            line = %line,
            "Skill resolved"
        );

        if resolution.ended.is_none() {
            self.open_windows(&resolution);
        }
        // Views as this action left them.
        let view = |side| combatant_view(&self.state, &self.windows, side);
        let (player, enemy) = (view(Side::Player), view(Side::Enemy));
        self.outputs
            .event_bus
            .publish(Event::Combat(CombatNotice {
                epoch: self.epoch,
                resolution: resolution.clone(),
                line,
                player,
                enemy,
            }));

        match resolution.ended {
            Some(outcome) => self.finish(outcome),
            None => self.publish_snapshot(),
        }
        Some(resolution)
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(
            target: "battle::worker",
            epoch = self.epoch,
            outcome = outcome.message(),
            "Battle over"
        );
        self.outputs.metrics.record_finished();
        self.outputs
            .event_bus
            .publish(Event::Lifecycle(LifecycleEvent::BattleEnded {
                epoch: self.epoch,
                outcome,
            }));
        self.stop();
    }

    fn open_windows(&mut self, resolution: &Resolution) {
        let target = resolution.target();
        let (window, length) = match resolution.kind {
            SkillKind::Attack | SkillKind::Special => (Window::Hit, self.config.hit_flash()),
            SkillKind::Heal => (Window::Heal, self.config.heal_flash()),
            SkillKind::Block => {
                let duration = self.roster.skill(target, SkillKind::Block).duration_ms;
                (Window::Block, Duration::from_millis(duration))
            }
        };
        self.open_window(target, window, length);
    }

    fn open_window(&mut self, side: Side, window: Window, length: Duration) {
        let slot = self.windows.get_mut(side).slot_mut(window);
        slot.open = true;
        slot.seq += 1;
        let seq = slot.seq;

        let Some(command_tx) = self.command_tx.upgrade() else {
            return;
        };
        let epoch = self.epoch;
        self.tasks.spawn_oneshot(async move {
            tokio::time::sleep(length).await;
            let _ = command_tx
                .send(Command::CloseWindow {
                    epoch,
                    side,
                    window,
                    seq,
                })
                .await;
        });
    }

    fn close_window(&mut self, side: Side, window: Window, seq: u64) {
        let slot = self.windows.get_mut(side).slot_mut(window);
        if slot.seq != seq {
            trace!(
                target: "battle::worker",
                side = side.as_str(),
                ?window,
                "Window reopened since, close ignored"
            );
            return;
        }
        slot.open = false;
        if window == Window::Block {
            self.state.end_block(side);
        }
        self.publish_snapshot();
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx
            .send_replace(compose_snapshot(&self.state, &self.windows, self.running));
    }
}

fn compose_snapshot(
    state: &BattleState,
    windows: &PerSide<SideWindows>,
    running: bool,
) -> BattleSnapshot {
    BattleSnapshot {
        player: combatant_view(state, windows, Side::Player),
        enemy: combatant_view(state, windows, Side::Enemy),
        log: state.log().to_vec(),
        game_over: state.is_game_over(),
        outcome: state.outcome(),
        running,
    }
}

fn combatant_view(
    state: &BattleState,
    windows: &PerSide<SideWindows>,
    side: Side,
) -> CombatantView {
    let w = windows.get(side);
    CombatantView::new(state.combatant(side), w.hit.open, w.heal.open)
}
