//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_config;
mod replay;

pub use check_config::CheckConfig;
pub use replay::Replay;
