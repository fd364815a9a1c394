//! Data-driven battle content.
//!
//! This crate houses the built-in combatants and power catalogues and
//! provides loaders for RON/TOML data files:
//! - Battle configuration (TOML)
//! - Combatant and power catalogue definitions (RON)
//! - Ally and enemy rosters (RON)
//! - Persisted combatant snapshots (RON)
//!
//! Named content is resolved through an explicit [`CombatantRegistry`] that
//! the application owns and passes around.

pub mod presets;
pub mod registry;
pub mod template;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::{CombatantRegistry, RegistryError};
pub use template::{CatalogueSpec, CombatantTemplate, StrategySpec, TemplateError};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, RosterEntry, RosterLoader, SnapshotLoader,
};
