//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, move providers and the engine
//! so clients can bubble them up with consistent context.
use battle_core::{BattleError, Side};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side:?} move provider not set")]
    ProviderNotSet { side: Side },

    #[error("{side:?} move provider failed: {message}")]
    Provider { side: Side, message: String },

    #[error("runtime requires a battle to be configured before building")]
    MissingBattle,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("battle still undecided after {0} rounds")]
    RoundLimitReached(u32),

    #[error(transparent)]
    Battle(#[from] BattleError),
}
