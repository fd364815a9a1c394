//! Actions submitted to the battle engine.
//!
//! An [`ActionRequest`] is both what a caller submits through
//! [`crate::BattleEngine::queue_action`] and what the engine keeps in its
//! queue until the round is resolved.

use crate::combatant::CombatantId;

/// What an action does when it is resolved.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Defend,
    UsePower { power: String },
    /// Items live in an external inventory; resolving one is a no-op here.
    UseItem { item: String },
    Flee,
}

/// A single queued action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRequest {
    pub actor: CombatantId,
    pub kind: ActionKind,
    pub target: Option<CombatantId>,
    /// Flat bonus added to the actor's Attack for this action.
    pub bonus: i32,
    /// Higher priorities resolve first; equal priorities keep queue order.
    pub priority: i32,
}

impl ActionRequest {
    pub fn new(actor: CombatantId, kind: ActionKind) -> Self {
        Self {
            actor,
            kind,
            target: None,
            bonus: 0,
            priority: 0,
        }
    }

    pub fn attack(actor: CombatantId, target: CombatantId) -> Self {
        Self::new(actor, ActionKind::Attack).with_target(target)
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Defend)
    }

    pub fn use_power(actor: CombatantId, power: impl Into<String>) -> Self {
        Self::new(
            actor,
            ActionKind::UsePower {
                power: power.into(),
            },
        )
    }

    pub fn use_item(actor: CombatantId, item: impl Into<String>) -> Self {
        Self::new(actor, ActionKind::UseItem { item: item.into() })
    }

    pub fn flee(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Flee)
    }

    pub fn with_target(mut self, target: CombatantId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
