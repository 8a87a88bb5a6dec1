//! Pure data model for the arena agent.
//!
//! `arena-core` defines the types exchanged between the navigation engine, the
//! decision layer and offline tooling: geometry primitives, the per-tick
//! [`WorldSnapshot`], the emitted [`Command`], static configuration and the
//! lane table. It performs no I/O and holds no per-tick state.
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lanes;
pub mod world;

pub use command::{CombatAction, Command};
pub use config::{
    AgentConfig, ArenaConfig, FighterConfig, ForceConfig, HealthThresholds, PathConfig,
    SensingConfig,
};
pub use error::{ConfigError, ErrorSeverity, GameError, SnapshotError};
pub use geometry::{Point, Vector, distance, rel_angle, to_local};
pub use lanes::{Lane, LaneAssignment, LaneTable};
pub use world::{EntityId, Faction, GameRules, SelfState, Unit, UnitKind, WorldSnapshot};
