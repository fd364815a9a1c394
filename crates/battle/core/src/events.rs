//! Outbound notifications produced by the engine.
//!
//! Events accumulate inside the engine and are handed to the host through
//! [`crate::BattleEngine::drain_events`].

use crate::combatant::CombatantId;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// Human-readable narration line.
    Message(String),
    DamageDealt {
        target: CombatantId,
        amount: i32,
    },
    PowerUsed {
        actor: CombatantId,
        power: String,
    },
    BattleEnded {
        victory: bool,
    },
    LevelUp {
        combatant: CombatantId,
        level: i32,
    },
}

impl BattleEvent {
    pub fn message(text: impl Into<String>) -> Self {
        BattleEvent::Message(text.into())
    }
}
