//! Combatant and power catalogue definitions loader.

use std::path::Path;

use battle_core::PowerCatalogue;

use crate::loaders::{LoadResult, read_file};
use crate::registry::CombatantRegistry;
use crate::template::CombatantTemplate;

/// Loader for named content definitions from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load combatant definitions.
    ///
    /// RON format: `Vec<(String, CombatantTemplate)>`
    pub fn load_combatants(path: &Path) -> LoadResult<Vec<(String, CombatantTemplate)>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combatant catalog RON: {}", e))
    }

    /// Load power catalogue definitions.
    ///
    /// RON format: `Vec<(String, PowerCatalogue)>`
    pub fn load_catalogues(path: &Path) -> LoadResult<Vec<(String, PowerCatalogue)>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse power catalogue RON: {}", e))
    }

    /// Register every definition found in the given files. Catalogues are
    /// registered first so combatants can refer to them by name.
    pub fn register_into(
        registry: &mut CombatantRegistry,
        combatants: Option<&Path>,
        catalogues: Option<&Path>,
    ) -> LoadResult<()> {
        if let Some(path) = catalogues {
            for (key, catalogue) in Self::load_catalogues(path)? {
                registry.register_catalogue(key, catalogue);
            }
        }
        if let Some(path) = combatants {
            for (key, template) in Self::load_combatants(path)? {
                registry.register_template(key, template);
            }
        }
        Ok(())
    }
}
