//! Navigation engine for a single arena agent.
//!
//! - [`Grid`]: per-tick rasterization of obstacles into traversal costs
//! - [`search`]: deterministic weighted A* between two cells
//! - [`CruiseControl`]: path-following plus obstacle avoidance, producing
//!   forward and strafe speeds
//!
//! Everything here is synchronous and owned by one agent.
pub mod cruise;
pub mod grid;
pub mod search;

pub use cruise::{CruiseControl, CruiseState, Steering};
pub use grid::{Cell, Grid, Obstacle, Step};
pub use search::{heuristic, search};
