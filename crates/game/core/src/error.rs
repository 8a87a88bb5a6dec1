//! Common error infrastructure for arena-core.
//!
//! Nothing in the decision core is expected to fail during normal play:
//! missing paths and missing targets are ordinary conditions, not errors.
//! The types here cover the two things that can genuinely be wrong, a
//! malformed snapshot and an invalid configuration.

use crate::lanes::Lane;
use crate::world::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: bad input for one tick; the next tick may be fine
/// - **Fatal**: the agent cannot run with this setup at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Invalid input, reject it and carry on with the next tick.
    ///
    /// Examples: non-finite coordinates, zero max health
    Validation,

    /// Unrecoverable setup problem.
    ///
    /// Examples: empty lane, non-positive cell width
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common interface implemented by all error types in the workspace.
pub trait GameError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;
}

/// Problems detected while validating a world snapshot.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("entity {id} has a non-finite position")]
    NonFinitePosition { id: EntityId },

    #[error("entity {id} has an invalid radius {radius}")]
    InvalidRadius { id: EntityId, radius: f64 },

    #[error("entity {id} reports zero max health")]
    ZeroMaxHealth { id: EntityId },

    #[error("controlled hero has a non-finite facing angle")]
    NonFiniteFacing,

    #[error("no lane is assigned to hero {id}")]
    UnassignedLane { id: EntityId },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Problems detected while validating static configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid node width must be positive (got {0})")]
    InvalidNodeWidth(f64),

    #[error("arena {width}x{height} is smaller than one grid cell")]
    ArenaTooSmall { width: f64, height: f64 },

    #[error("{name} must lie in [0, 1] (got {value})")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("diagonal move cost {diagonal} must exceed orthogonal cost {orthogonal}")]
    InconsistentMoveCosts { orthogonal: u32, diagonal: u32 },

    #[error("lane {0} has no waypoints")]
    EmptyLane(Lane),

    #[error("lane {lane} waypoint {index} is not finite")]
    NonFiniteWaypoint { lane: Lane, index: usize },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }
}
