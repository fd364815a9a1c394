//! Combatant snapshot persistence.

use std::path::Path;

use anyhow::Context;
use battle_core::Roster;
use battle_core::summary::{CombatantSnapshot, SNAPSHOT_VERSION};

use crate::loaders::{LoadResult, read_file};

/// Reads and writes rosters as RON lists of [`CombatantSnapshot`].
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Load snapshots, rejecting documents written by a newer layout.
    pub fn load(path: &Path) -> LoadResult<Vec<CombatantSnapshot>> {
        let content = read_file(path)?;
        let snapshots: Vec<CombatantSnapshot> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse snapshot RON: {}", e))?;

        if let Some(newer) = snapshots.iter().find(|s| s.version > SNAPSHOT_VERSION) {
            anyhow::bail!(
                "snapshot of '{}' has version {} (supported: {})",
                newer.name,
                newer.version,
                SNAPSHOT_VERSION
            );
        }
        Ok(snapshots)
    }

    /// Load snapshots and restore them as a roster.
    pub fn load_roster(path: &Path) -> LoadResult<Roster> {
        Ok(Self::load(path)?
            .into_iter()
            .map(CombatantSnapshot::restore)
            .collect())
    }

    /// Write the persistent state of every roster member.
    pub fn save(path: &Path, roster: &Roster) -> LoadResult<()> {
        let snapshots: Vec<CombatantSnapshot> =
            roster.iter().map(CombatantSnapshot::capture).collect();
        let content = ron::ser::to_string_pretty(&snapshots, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize snapshots: {}", e))?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write snapshots to {}", path.display()))?;
        tracing::info!(path = %path.display(), members = snapshots.len(), "roster saved");
        Ok(())
    }
}
