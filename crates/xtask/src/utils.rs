//! Utility functions for xtask commands

use std::path::PathBuf;

use anyhow::Result;
use arena_content::{ConfigLoader, ContentFactory, LaneLoader, default_data_dir};
use arena_core::{AgentConfig, LaneTable};

/// Data directory from `ARENA_DATA_DIR`, or the defaults shipped with
/// `arena-content`.
pub fn data_dir() -> PathBuf {
    std::env::var_os("ARENA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(default_data_dir)
}

/// Loads configuration and lanes, preferring explicit paths over the data
/// directory.
pub fn load_content(
    config: Option<&PathBuf>,
    lanes: Option<&PathBuf>,
) -> Result<(AgentConfig, LaneTable)> {
    let factory = ContentFactory::new(data_dir());
    let config = match config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let lanes = match lanes {
        Some(path) => LaneLoader::load(path)?,
        None => factory.load_lanes()?,
    };
    Ok((config, lanes))
}
