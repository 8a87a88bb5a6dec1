//! Lane table loader.

use std::path::Path;

use anyhow::Context;
use arena_core::LaneTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`LaneTable`] from RON files.
pub struct LaneLoader;

impl LaneLoader {
    pub fn load(path: &Path) -> LoadResult<LaneTable> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid lane table {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<LaneTable> {
        let lanes: LaneTable = ron::from_str(content).context("failed to parse lanes RON")?;
        lanes.validate()?;
        Ok(lanes)
    }
}
