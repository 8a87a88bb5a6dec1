//! Content loaders for reading agent data from files.

pub mod config;
pub mod factory;
pub mod lanes;
pub mod snapshots;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use lanes::LaneLoader;
pub use snapshots::SnapshotLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
