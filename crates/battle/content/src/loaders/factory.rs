//! Content factory for assembling a battle from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Roster};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, RosterLoader};
use crate::registry::CombatantRegistry;

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml       (optional, defaults otherwise)
/// ├── catalogues.ron    (optional, extra power catalogues)
/// ├── combatants.ron    (optional, extra combatant templates)
/// ├── allies.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `config.toml`, or the default configuration when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Built-in registry extended with `catalogues.ron` and `combatants.ron`.
    pub fn load_registry(&self) -> LoadResult<CombatantRegistry> {
        let mut registry = CombatantRegistry::with_builtins();
        let combatants = self.data_dir.join("combatants.ron");
        let catalogues = self.data_dir.join("catalogues.ron");
        CatalogLoader::register_into(
            &mut registry,
            combatants.exists().then_some(combatants.as_path()),
            catalogues.exists().then_some(catalogues.as_path()),
        )?;
        Ok(registry)
    }

    /// Load `allies.ron` and `enemies.ron`.
    pub fn load_rosters(&self, registry: &CombatantRegistry) -> LoadResult<(Roster, Roster)> {
        let allies = RosterLoader::load(&self.data_dir.join("allies.ron"), registry)?;
        let enemies = RosterLoader::load(&self.data_dir.join("enemies.ron"), registry)?;
        Ok((allies, enemies))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/battle-data");
        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
    }
}
