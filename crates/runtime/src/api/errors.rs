//! Errors surfaced by the engine API.
//!
//! Simulation paths never fail; these cover bootstrapping and the channel
//! plumbing between handles and the battle worker.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::RosterError;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid roster")]
    InvalidRoster(#[from] RosterError),

    #[error("invalid engine config")]
    InvalidConfig(#[from] ConfigError),

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
