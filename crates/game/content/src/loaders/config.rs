//! Agent configuration loader.

use std::path::Path;

use anyhow::Context;
use arena_core::AgentConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AgentConfig`] from TOML files.
///
/// Missing sections and keys fall back to their defaults, so a file only has
/// to mention what it changes. The result is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<AgentConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<AgentConfig> {
        let config: AgentConfig = toml::from_str(content).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{ConfigError, Point};

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [fighter]
            flee_ticks = 12

            [sensing]
            enemy_base_fallback = { x = 3500.0, y = 500.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.fighter.flee_ticks, 12);
        assert_eq!(config.sensing.enemy_base_fallback, Point::new(3500.0, 500.0));
        assert_eq!(config.arena, AgentConfig::default().arena);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), AgentConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ConfigLoader::parse("[health]\nweak = 1.5\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FractionOutOfRange { name: "health.weak", .. })
        ));
    }
}
