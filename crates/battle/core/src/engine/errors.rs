//! Error types surfaced by the battle engine.

use crate::combatant::CombatantId;

use super::BattlePhase;

/// Reasons a battle cannot be set up or started.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("ally roster is empty")]
    NoAllies,

    #[error("enemy roster is empty")]
    NoEnemies,

    /// Rosters can only change, and a battle can only start, in `Setup`.
    #[error("battle already started (phase {phase})")]
    AlreadyStarted { phase: BattlePhase },
}

/// Reasons an action submission is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("battle is not running (phase {phase})")]
    NotActive { phase: BattlePhase },

    #[error("unknown combatant {0}")]
    UnknownActor(CombatantId),

    #[error("unknown target {0}")]
    UnknownTarget(CombatantId),

    #[error("{0} is defeated")]
    ActorDefeated(CombatantId),

    #[error("{0} is stunned")]
    ActorStunned(CombatantId),

    #[error("not {actor}'s turn (current: {current:?})")]
    NotCurrentActor {
        actor: CombatantId,
        current: Option<CombatantId>,
    },

    #[error("{actor} cannot act during {phase}")]
    WrongPhase {
        actor: CombatantId,
        phase: BattlePhase,
    },

    #[error("{0} already acted this round")]
    AlreadyActed(CombatantId),
}
