//! Typed, versioned persistence schemas.
//!
//! [`BattleSummary`] captures the observable state of a battle and
//! [`CombatantSnapshot`] the persistent part of a combatant. Both carry a
//! `version` so stored documents can be migrated when the layout changes.

use crate::combatant::{Combatant, CombatantKind};
use crate::engine::BattlePhase;
use crate::powers::PowerCatalogue;
use crate::stats::StatBlock;
use crate::strategy::StrategyConfig;

/// Current layout version of [`BattleSummary`].
pub const SUMMARY_VERSION: u32 = 1;
/// Current layout version of [`CombatantSnapshot`].
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub version: u32,
    pub phase: BattlePhase,
    pub round: u32,
    pub ended: bool,
    pub victory: bool,
    pub experience_reward: i64,
    pub currency_reward: u64,
    pub ally_count: usize,
    pub enemy_count: usize,
}

/// Persistent state of one combatant, independent of any battle.
///
/// Battle-scoped state (stun, engagement, position) is not captured; take
/// snapshots after the battle has ended so modifiers are already cleared.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub version: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    pub kind: CombatantKind,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub powers: Option<PowerCatalogue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: Option<StrategyConfig>,
    pub move_speed: f32,
}

impl CombatantSnapshot {
    pub fn capture(combatant: &Combatant) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            name: combatant.name.clone(),
            title: combatant.title.clone(),
            kind: combatant.kind,
            stats: combatant.stats.clone(),
            powers: combatant.powers.clone(),
            bounty: combatant.bounty,
            strategy: combatant.strategy.clone(),
            move_speed: combatant.move_speed,
        }
    }

    pub fn restore(self) -> Combatant {
        let mut combatant = Combatant::new(self.name, self.kind)
            .with_stats(self.stats)
            .with_bounty(self.bounty)
            .with_move_speed(self.move_speed);
        combatant.title = self.title;
        combatant.powers = self.powers;
        combatant.strategy = self.strategy;
        combatant
    }
}

impl From<&Combatant> for CombatantSnapshot {
    fn from(combatant: &Combatant) -> Self {
        Self::capture(combatant)
    }
}
