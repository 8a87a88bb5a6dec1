//! Snapshot recording loader.
//!
//! Recordings hold one JSON-encoded [`WorldSnapshot`] per line. Blank lines
//! and lines starting with `#` are skipped.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use arena_core::WorldSnapshot;

use crate::loaders::{LoadResult, read_file};

pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<WorldSnapshot>> {
        let content = read_file(path)?;
        let snapshots = Self::parse(&content)
            .with_context(|| format!("invalid recording {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = snapshots.len(), "recording loaded");
        Ok(snapshots)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WorldSnapshot>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .map(|(index, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("failed to parse snapshot on line {}", index + 1))
            })
            .collect()
    }

    /// Writes snapshots in the format [`SnapshotLoader::load`] reads.
    pub fn save(path: &Path, snapshots: &[WorldSnapshot]) -> LoadResult<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        for snapshot in snapshots {
            serde_json::to_writer(&mut file, snapshot)?;
            writeln!(file)?;
        }
        Ok(())
    }
}
