//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;

        if config.max_rounds == 0 {
            anyhow::bail!("max_rounds must be at least 1");
        }
        if config.turn_timeout.is_nan() || config.turn_timeout <= 0.0 {
            anyhow::bail!("turn_timeout must be positive, got {}", config.turn_timeout);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("allow_flee = false\nmax_rounds = 12\n").unwrap();
        assert!(!config.allow_flee);
        assert_eq!(config.max_rounds, 12);
        assert_eq!(config.turn_timeout, BattleConfig::DEFAULT_TURN_TIMEOUT);
        assert_eq!(config.defend_bonus, BattleConfig::DEFAULT_DEFEND_BONUS);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        assert!(ConfigLoader::parse("max_rounds = 0").is_err());
        assert!(ConfigLoader::parse("turn_timeout = -1.0").is_err());
        assert!(ConfigLoader::parse("max_rounds = \"many\"").is_err());
    }
}
