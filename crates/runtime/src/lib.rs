//! Host runtime for the battle engine.
//!
//! This crate wraps a [`battle_core::BattleEngine`] in a tick-driven session,
//! sources player and crew intent from pluggable providers, and fans engine
//! events out over a topic-based bus.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the tick loop
//! - [`api`] exposes the provider trait and error types
//! - [`events`] provides topic-based event routing
//! - [`config`] reads host settings from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod session;

pub use api::{
    ActionProvider, ProviderKind, Result, RuntimeError, ScriptedActionProvider,
    StrategyActionProvider, WaitActionProvider,
};
pub use config::RuntimeConfig;
pub use events::{Event, EventBus, Topic};
pub use session::{BattleSession, SessionReport};
