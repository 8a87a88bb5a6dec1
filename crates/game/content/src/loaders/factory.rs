//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use arena_core::{AgentConfig, LaneTable};

use crate::loaders::{ConfigLoader, LaneLoader, LoadResult};

/// Loads agent content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── agent.toml
/// └── lanes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "agent.toml";
    pub const LANES_FILE: &'static str = "lanes.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load agent configuration from `agent.toml`.
    pub fn load_config(&self) -> LoadResult<AgentConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load lane routes from `lanes.ron`.
    pub fn load_lanes(&self) -> LoadResult<LaneTable> {
        LaneLoader::load(&self.data_dir.join(Self::LANES_FILE))
    }
}
