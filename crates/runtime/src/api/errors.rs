//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine setup failures together with provider problems so
//! hosts can bubble them up with consistent context.
use std::fmt;

use battle_core::{BattlePhase, CombatantId, SetupError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle setup failed")]
    Setup(#[from] SetupError),

    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("{kind} action provider failed for {actor}: {message}")]
    Provider {
        kind: ProviderKind,
        actor: CombatantId,
        message: String,
    },

    #[error("battle has not been started (phase {phase})")]
    NotStarted { phase: BattlePhase },

    #[error("battle still running after {ticks} ticks")]
    TickLimit { ticks: u64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Player,
    Crew,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Crew => "crew",
        };
        write!(f, "{}", label)
    }
}
