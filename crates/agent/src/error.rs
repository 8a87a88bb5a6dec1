//! Errors surfaced by [`Agent`](crate::Agent).
//!
//! Wraps snapshot and configuration failures from `arena-core` so callers can
//! decide from [`GameError::severity`] whether to skip a tick or give up.
use arena_core::{ConfigError, ErrorSeverity, GameError, SnapshotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum AgentError {
    #[error("rejected snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl GameError for AgentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Snapshot(err) => err.severity(),
            Self::Config(err) => err.severity(),
        }
    }
}
