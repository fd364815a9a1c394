use std::fmt;

/// Roster a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Non-owning handle to a combatant inside a battle.
///
/// Handles stay valid for the whole battle because rosters never shrink while
/// the engine owns them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId {
    pub side: Side,
    pub index: usize,
}

impl CombatantId {
    pub const fn ally(index: usize) -> Self {
        Self {
            side: Side::Ally,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }

    /// Stable numeric key mixed into RNG seeds.
    pub fn rng_key(self) -> u32 {
        let side = match self.side {
            Side::Ally => 0,
            Side::Enemy => 1,
        };
        ((self.index as u32) << 1) | side
    }

    pub fn is_ally(self) -> bool {
        self.side == Side::Ally
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_keys_are_distinct_per_side() {
        assert_ne!(CombatantId::ally(0).rng_key(), CombatantId::enemy(0).rng_key());
        assert_ne!(CombatantId::ally(1).rng_key(), CombatantId::enemy(0).rng_key());
    }

    #[test]
    fn display_names_side_and_index() {
        assert_eq!(CombatantId::enemy(2).to_string(), "enemy#2");
    }
}
