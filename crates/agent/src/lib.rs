//! Decision layer for a single arena hero.
//!
//! Each tick the [`Critic`] reads the [`WorldSnapshot`](arena_core::WorldSnapshot),
//! picks a target and a [`BehaviorState`], and the [`Actor`] turns that into a
//! [`Command`](arena_core::Command) using the navigation engine. [`Agent`]
//! glues the two together and validates input.
pub mod actor;
pub mod agent;
pub mod critic;
pub mod error;
pub mod state;

pub use actor::{Actor, Maneuver, combat, steer_point};
pub use agent::Agent;
pub use critic::{Assessment, Critic, Outlook, Surroundings};
pub use error::{AgentError, Result};
pub use state::BehaviorState;
