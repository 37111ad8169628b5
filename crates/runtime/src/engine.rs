//! High-level battle engine.
//!
//! The engine owns the battle worker, wires up the command, snapshot and
//! event channels, and exposes a builder-based API for observers.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use battle_core::{BattleState, Roster};

use crate::api::{BattleHandle, EngineError, Result, TimerBoard};
use crate::config::EngineConfig;
use crate::events::EventBus;
use crate::workers::{BattleWorker, Command, EngineMetrics, WorkerOutputs};

/// Owns the battle worker task.
///
/// Design: the engine owns the worker and its lifetime; [`BattleHandle`]
/// provides a cloneable façade for observers.
pub struct BattleEngine {
    handle: BattleHandle,
    worker_handle: JoinHandle<()>,
}

impl BattleEngine {
    /// Create a new engine builder
    pub fn builder() -> BattleEngineBuilder {
        BattleEngineBuilder::new()
    }

    /// Get a cloneable handle to this engine
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Stop every task and wait for the worker to exit.
    ///
    /// Call this when the observer is permanently discarded.
    pub async fn teardown(self) -> Result<()> {
        match self.handle.shutdown().await {
            Ok(()) => {}
            // Worker already gone; nothing left to stop.
            Err(EngineError::CommandChannelClosed | EngineError::ReplyChannelClosed(_)) => {}
            Err(err) => return Err(err),
        }
        drop(self.handle);

        match self.worker_handle.await {
            Ok(()) => {}
            Err(err) if err.is_cancelled() => {}
            Err(err) => return Err(EngineError::WorkerJoin(err)),
        }
        info!(target: "battle::engine", "Engine torn down");
        Ok(())
    }
}

/// Builder for [`BattleEngine`] with flexible configuration.
pub struct BattleEngineBuilder {
    config: EngineConfig,
    roster: Roster,
    autostart: bool,
}

impl BattleEngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            roster: Roster::default(),
            autostart: true,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default stat and skill tables
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Whether `build` launches the first battle (default: true)
    pub fn autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Build the engine and spawn its worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build(self) -> Result<BattleEngine> {
        self.config.validate()?;
        let state = BattleState::new(&self.roster, self.config.log_capacity)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let timers = Arc::new(TimerBoard::new(&self.roster));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let metrics = Arc::new(EngineMetrics::new());

        let worker = BattleWorker::new(
            self.roster,
            self.config,
            state,
            command_rx,
            command_tx.downgrade(),
            WorkerOutputs {
                timers: Arc::clone(&timers),
                event_bus: event_bus.clone(),
                metrics: Arc::clone(&metrics),
            },
        );
        let snapshots = worker.subscribe_snapshots();

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let handle = BattleHandle::new(command_tx, snapshots, timers, event_bus, metrics);
        debug!(target: "battle::engine", "Battle worker spawned");

        if self.autostart {
            handle.start().await?;
        }

        Ok(BattleEngine {
            handle,
            worker_handle,
        })
    }
}
