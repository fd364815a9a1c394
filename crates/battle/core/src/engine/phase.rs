/// State of the battle state machine.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    /// Rosters are being assembled; nothing ticks.
    #[default]
    Setup,
    /// Between turns: picks the next actor or closes the round.
    TurnOrder,
    /// Waiting for external input for the current ally player.
    PlayerTurn,
    /// Waiting for input (or autopilot) for the current crew member.
    CrewTurn,
    /// The current enemy has already decided; advances on the next update.
    EnemyTurn,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Victory | BattlePhase::Defeat)
    }

    /// Phases in which a combatant owns the turn.
    pub const fn is_turn(self) -> bool {
        matches!(
            self,
            BattlePhase::PlayerTurn | BattlePhase::CrewTurn | BattlePhase::EnemyTurn
        )
    }
}

/// Terminal result of a battle, from the allies' point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    pub const fn from_victory(victory: bool) -> Self {
        if victory {
            BattleOutcome::Victory
        } else {
            BattleOutcome::Defeat
        }
    }

    pub const fn is_victory(self) -> bool {
        matches!(self, BattleOutcome::Victory)
    }

    pub const fn phase(self) -> BattlePhase {
        match self {
            BattleOutcome::Victory => BattlePhase::Victory,
            BattleOutcome::Defeat => BattlePhase::Defeat,
        }
    }
}
