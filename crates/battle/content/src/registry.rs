//! Named combatant and power-catalogue lookup.

use std::collections::BTreeMap;

use battle_core::{Combatant, PowerCatalogue};

use crate::presets;
use crate::template::{CombatantTemplate, TemplateError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("combatant '{0}' is not registered")]
    UnknownCombatant(String),

    #[error("combatant '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
}

#[derive(Clone, Debug)]
enum Entry {
    Builtin(fn() -> Combatant),
    Template(CombatantTemplate),
}

/// Explicit registry of combatant blueprints and power catalogues.
///
/// Every lookup returns a fresh value; registered entries are never handed
/// out by reference.
#[derive(Clone, Debug, Default)]
pub struct CombatantRegistry {
    combatants: BTreeMap<String, Entry>,
    catalogues: BTreeMap<String, PowerCatalogue>,
}

impl CombatantRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock crew and power catalogues.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtin("luffy", presets::luffy);
        registry.register_builtin("zoro", presets::zoro);
        registry.register_builtin("nami", presets::nami);
        registry.register_builtin("sanji", presets::sanji);

        registry.register_catalogue("gomu_gomu", presets::gomu_gomu());
        registry.register_catalogue("mera_mera", presets::mera_mera());
        registry.register_catalogue("hie_hie", presets::hie_hie());

        tracing::debug!(
            combatants = registry.combatants.len(),
            catalogues = registry.catalogues.len(),
            "registered built-in content"
        );
        registry
    }

    pub fn register_builtin(&mut self, key: impl Into<String>, create: fn() -> Combatant) {
        self.insert(key.into(), Entry::Builtin(create));
    }

    pub fn register_template(&mut self, key: impl Into<String>, template: CombatantTemplate) {
        self.insert(key.into(), Entry::Template(template));
    }

    pub fn register_catalogue(&mut self, key: impl Into<String>, catalogue: PowerCatalogue) {
        let key = key.into();
        if self.catalogues.insert(key.clone(), catalogue).is_some() {
            tracing::debug!(%key, "power catalogue replaced");
        }
    }

    fn insert(&mut self, key: String, entry: Entry) {
        if self.combatants.insert(key.clone(), entry).is_some() {
            tracing::debug!(%key, "combatant replaced");
        }
    }

    /// Build a fresh combatant registered under `key`.
    pub fn create(&self, key: &str) -> Result<Combatant, RegistryError> {
        match self.combatants.get(key) {
            Some(Entry::Builtin(create)) => Ok(create()),
            Some(Entry::Template(template)) => {
                template
                    .build(self)
                    .map_err(|source| RegistryError::Template {
                        name: key.to_string(),
                        source,
                    })
            }
            None => {
                tracing::warn!(key, "combatant not found in registry");
                Err(RegistryError::UnknownCombatant(key.to_string()))
            }
        }
    }

    /// Copy of the catalogue registered under `key`.
    pub fn catalogue(&self, key: &str) -> Option<PowerCatalogue> {
        self.catalogues.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.combatants.contains_key(key)
    }

    /// Registered combatant keys, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.combatants.keys().map(String::as_str)
    }

    /// Registered catalogue keys, sorted.
    pub fn catalogue_names(&self) -> impl Iterator<Item = &str> {
        self.catalogues.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatantKind, StatKind};

    #[test]
    fn builtins_are_listed_and_fresh() {
        let registry = CombatantRegistry::with_builtins();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["luffy", "nami", "sanji", "zoro"]
        );

        let mut first = registry.create("zoro").unwrap();
        first.stats.apply_damage(50);
        let second = registry.create("zoro").unwrap();
        assert_eq!(second.stats.current_health(), 130);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let registry = CombatantRegistry::new();
        assert_eq!(
            registry.create("buggy").unwrap_err(),
            RegistryError::UnknownCombatant("buggy".into())
        );
    }

    #[test]
    fn templates_resolve_catalogues_from_the_same_registry() {
        let mut registry = CombatantRegistry::with_builtins();
        let mut template = CombatantTemplate::new("Smoker", CombatantKind::Enemy)
            .with_stat(StatKind::Level, 6);
        template.powers = Some(crate::template::CatalogueSpec::Preset("hie_hie".into()));
        registry.register_template("smoker", template);

        let smoker = registry.create("smoker").unwrap();
        assert_eq!(smoker.level(), 6);
        assert_eq!(smoker.powers.unwrap().name, "Hie Hie no Mi");
    }
}
