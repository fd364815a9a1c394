//! Roster loader.

use std::path::Path;

use anyhow::Context;
use battle_core::Roster;

use crate::loaders::{LoadResult, read_file};
use crate::registry::CombatantRegistry;
use crate::template::CombatantTemplate;

/// One roster slot: a registered combatant or an inline template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RosterEntry {
    Preset(String),
    Template(CombatantTemplate),
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster.
    ///
    /// RON format: `Vec<RosterEntry>`, resolved against `registry`.
    pub fn load(path: &Path, registry: &CombatantRegistry) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content, registry)
            .with_context(|| format!("Failed to load roster {}", path.display()))
    }

    pub fn parse(content: &str, registry: &CombatantRegistry) -> LoadResult<Roster> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut roster = Roster::new();
        for (slot, entry) in entries.into_iter().enumerate() {
            let combatant = match entry {
                RosterEntry::Preset(key) => registry.create(&key)?,
                RosterEntry::Template(template) => template
                    .build(registry)
                    .with_context(|| format!("roster slot {slot} ('{}')", template.name))?,
            };
            roster.push(combatant);
        }

        tracing::debug!(members = roster.len(), "roster loaded");
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatantKind, StatKind};

    #[test]
    fn mixes_presets_and_inline_templates() {
        let registry = CombatantRegistry::with_builtins();
        let roster = RosterLoader::parse(
            r#"[
                Preset("luffy"),
                Template((
                    name: "Usopp",
                    kind: CrewMember,
                    stats: { Attack: 9, Speed: 11 },
                    strategy: Some(Preset("navigator")),
                )),
            ]"#,
            &registry,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(0).unwrap().kind, CombatantKind::Player);
        let usopp = roster.get(1).unwrap();
        assert_eq!(usopp.stats.final_value(StatKind::Attack), 9);
        assert!(usopp.strategy.is_some());
    }

    #[test]
    fn unknown_preset_fails_the_load() {
        let registry = CombatantRegistry::with_builtins();
        let error = RosterLoader::parse(r#"[Preset("brook")]"#, &registry).unwrap_err();
        assert!(error.to_string().contains("brook"));
    }
}
