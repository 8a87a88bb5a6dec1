//! Data files for the arena agent and the loaders that read them.
//!
//! - Agent tuning (TOML): [`ConfigLoader`]
//! - Lane routes and hero assignments (RON): [`LaneLoader`]
//! - Recorded world snapshots (JSON lines): [`SnapshotLoader`]
//!
//! The shipped defaults live in this crate's `data/` directory and can be
//! loaded together through [`ContentFactory`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LaneLoader, LoadResult, SnapshotLoader};

/// Directory holding the default data files shipped with the crate.
pub fn default_data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
