//! Data-file description of a combatant.

use std::collections::BTreeMap;

use battle_core::{Combatant, CombatantKind, PowerCatalogue, StatKind, StrategyConfig};

use crate::presets;
use crate::registry::CombatantRegistry;

/// Power catalogue given either by registered name or inline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogueSpec {
    Preset(String),
    Inline(PowerCatalogue),
}

/// Strategy given either by preset name or inline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategySpec {
    Preset(String),
    Custom(StrategyConfig),
}

/// Combatant blueprint. Unlisted stats keep their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    pub kind: CombatantKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BTreeMap<StatKind, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub powers: Option<CatalogueSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounty: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: Option<StrategySpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub move_speed: Option<f32>,
}

/// Errors raised while turning a template into a combatant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown power catalogue '{0}'")]
    UnknownCatalogue(String),

    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

impl CombatantTemplate {
    pub fn new(name: impl Into<String>, kind: CombatantKind) -> Self {
        Self {
            name: name.into(),
            title: None,
            kind,
            stats: BTreeMap::new(),
            powers: None,
            bounty: 0,
            strategy: None,
            move_speed: None,
        }
    }

    pub fn with_stat(mut self, kind: StatKind, value: i32) -> Self {
        self.stats.insert(kind, value);
        self
    }

    /// Build a fresh combatant, resolving named catalogues against `registry`.
    ///
    /// MaxHealth is applied before every other stat so an explicit Health is
    /// not rescaled afterwards. Enemies without a strategy get the default
    /// enemy strategy.
    pub fn build(&self, registry: &CombatantRegistry) -> Result<Combatant, TemplateError> {
        let mut combatant = Combatant::new(self.name.clone(), self.kind).with_bounty(self.bounty);
        combatant.title = self.title.clone();
        if let Some(speed) = self.move_speed {
            combatant.move_speed = speed;
        }

        if let Some(max) = self.stats.get(&StatKind::MaxHealth) {
            combatant.stats.set_base(StatKind::MaxHealth, *max);
        }
        for (&kind, &value) in &self.stats {
            if kind != StatKind::MaxHealth {
                combatant.stats.set_base(kind, value);
            }
        }

        combatant.powers = match &self.powers {
            None => None,
            Some(CatalogueSpec::Inline(catalogue)) => Some(catalogue.clone()),
            Some(CatalogueSpec::Preset(name)) => Some(
                registry
                    .catalogue(name)
                    .ok_or_else(|| TemplateError::UnknownCatalogue(name.clone()))?,
            ),
        };

        combatant.strategy = match &self.strategy {
            Some(StrategySpec::Custom(config)) => Some(config.clone()),
            Some(StrategySpec::Preset(name)) => Some(
                presets::strategy(name).ok_or_else(|| TemplateError::UnknownStrategy(name.clone()))?,
            ),
            None if self.kind == CombatantKind::Enemy => Some(StrategyConfig::enemy_default()),
            None => None,
        };

        Ok(combatant)
    }
}
