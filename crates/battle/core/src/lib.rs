//! Deterministic battle rules shared by every host.
//!
//! `battle-core` defines the canonical combat rules (stats, powers, decision
//! strategies, the battle state machine and its reward formulas) and exposes
//! pure, synchronous APIs. All combatant mutation during a battle flows
//! through [`engine::BattleEngine`]; supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod combatant;
pub mod config;
pub mod engine;
pub mod events;
pub mod powers;
pub mod rng;
pub mod stats;
pub mod strategy;
pub mod summary;

pub use action::{ActionKind, ActionRequest};
pub use combatant::{Combatant, CombatantId, CombatantKind, Position, Roster, Side};
pub use config::BattleConfig;
pub use engine::{
    BattleEngine, BattleOutcome, BattlePhase, QueueError, Rewards, SetupError, TurnOrderEntry,
};
pub use events::BattleEvent;
pub use powers::{Power, PowerCatalogue};
pub use rng::{PcgRng, RngOracle, RollContext};
pub use stats::{StatBlock, StatKind};
pub use strategy::{Decision, StrategyConfig, TargetRule};
pub use summary::{BattleSummary, CombatantSnapshot};
