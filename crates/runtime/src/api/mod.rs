//! Public API surface for hosts embedding a battle session.

mod errors;
mod providers;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{
    ActionProvider, ScriptedActionProvider, StrategyActionProvider, WaitActionProvider,
};
