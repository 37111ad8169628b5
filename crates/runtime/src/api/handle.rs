//! Cloneable façade for issuing commands to the battle engine.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for the
//! lifecycle commands plus subscriptions to snapshots, timers and events.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use battle_core::{Resolution, Side, SkillKind};

use super::errors::{EngineError, Result};
use super::snapshot::BattleSnapshot;
use super::timers::TimerBoard;
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, EngineMetrics};

/// Client-facing handle to interact with a running battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    snapshots: watch::Receiver<BattleSnapshot>,
    timers: Arc<TimerBoard>,
    event_bus: EventBus,
    metrics: Arc<EngineMetrics>,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        snapshots: watch::Receiver<BattleSnapshot>,
        timers: Arc<TimerBoard>,
        event_bus: EventBus,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            command_tx,
            snapshots,
            timers,
            event_bus,
            metrics,
        }
    }

    /// Restore both combatants, reseed the log and launch all skill timers.
    ///
    /// Returns the epoch of the new battle.
    pub async fn start(&self) -> Result<u64> {
        self.request(|reply| Command::Start { reply }).await
    }

    /// Cancel every timer and pending window. Idempotent.
    ///
    /// Returns whether a battle was running. Once this resolves, no trigger
    /// issued before the call can change the battle.
    pub async fn stop(&self) -> Result<bool> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// [`stop`](Self::stop) followed by [`start`](Self::start).
    pub async fn reset(&self) -> Result<u64> {
        self.stop().await?;
        self.start().await
    }

    /// Run `kind` for `side` immediately, through the same serialized path a
    /// timer trigger takes. The skill's own countdown is left untouched.
    ///
    /// Returns `None` if the action changed nothing (engine stopped, battle
    /// over, or a required combatant already dead).
    pub async fn force_trigger(&self, side: Side, kind: SkillKind) -> Result<Option<Resolution>> {
        self.request(|reply| Command::Force { side, kind, reply })
            .await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> BattleSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Push-on-change snapshot stream.
    pub fn subscribe_snapshots(&self) -> watch::Receiver<BattleSnapshot> {
        self.snapshots.clone()
    }

    /// Remaining milliseconds of one skill timer, updated every tick.
    pub fn subscribe_timer(&self, side: Side, kind: SkillKind) -> watch::Receiver<u64> {
        self.timers.subscribe(side, kind)
    }

    pub fn timer_remaining(&self, side: Side, kind: SkillKind) -> u64 {
        self.timers.remaining(side, kind)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Every resolved attack, special, heal and block
    /// - `Topic::Lifecycle` - Battle started, ended and stopped
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| EngineError::CommandChannelClosed)?;

        reply_rx.await.map_err(EngineError::ReplyChannelClosed)
    }
}
