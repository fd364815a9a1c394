use strum::{Display, EnumCount, EnumIter, EnumString};

/// Stats tracked for every combatant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Current health (base layer only).
    Health,
    MaxHealth,
    Attack,
    Defense,
    /// Initiative base.
    Speed,
    /// Resource spent by powers.
    Power,
    Haki,
    Experience,
    Level,
}

impl StatKind {
    /// Base value a freshly created stat block starts with.
    pub const fn default_base(self) -> i32 {
        match self {
            StatKind::Health | StatKind::MaxHealth => 100,
            StatKind::Attack => 10,
            StatKind::Defense => 5,
            StatKind::Speed => 8,
            StatKind::Level => 1,
            StatKind::Power | StatKind::Haki | StatKind::Experience => 0,
        }
    }

    /// Dense index for array-backed storage.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
