//! Layered stat storage for a single combatant.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use super::growth::{LevelGrowth, experience_required};
use super::kind::StatKind;

/// Base values plus battle-scoped modifiers and multipliers.
///
/// Base values are the persistent part of a combatant; modifiers and
/// multipliers only live for the duration of a battle and are removed by
/// [`StatBlock::clear_battle_modifiers`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    base: [i32; StatKind::COUNT],
    modifiers: BTreeMap<StatKind, i32>,
    multipliers: BTreeMap<StatKind, f32>,
}

impl StatBlock {
    /// Create a stat block with the default base values (level 1, 100 HP).
    pub fn new() -> Self {
        let mut base = [0; StatKind::COUNT];
        for kind in StatKind::iter() {
            base[kind.index()] = kind.default_base();
        }
        Self {
            base,
            modifiers: BTreeMap::new(),
            multipliers: BTreeMap::new(),
        }
    }

    // ========================================================================
    // Layers
    // ========================================================================

    pub fn base(&self, kind: StatKind) -> i32 {
        self.base[kind.index()]
    }

    /// Set a base value, clamped to zero.
    ///
    /// Setting [`StatKind::MaxHealth`] rescales current health so the health
    /// percentage is preserved. Setting [`StatKind::Health`] clamps to the
    /// current maximum.
    pub fn set_base(&mut self, kind: StatKind, value: i32) {
        let value = value.max(0);

        match kind {
            StatKind::MaxHealth => {
                let previous_max = i64::from(self.base(StatKind::MaxHealth).max(1));
                let percent = i64::from(self.current_health()) * 100 / previous_max;
                self.base[kind.index()] = value;

                let rescaled = (i64::from(value) * percent / 100) as i32;
                self.base[StatKind::Health.index()] = rescaled.min(self.max_health());
            }
            StatKind::Health => {
                self.base[kind.index()] = value.min(self.max_health());
            }
            _ => self.base[kind.index()] = value,
        }
    }

    /// Accumulated additive modifier (0 when none is present).
    pub fn modifier(&self, kind: StatKind) -> i32 {
        self.modifiers.get(&kind).copied().unwrap_or(0)
    }

    /// Multiplicative factor (1.0 when none is present).
    pub fn multiplier(&self, kind: StatKind) -> f32 {
        self.multipliers.get(&kind).copied().unwrap_or(1.0)
    }

    /// Add a battle-scoped additive modifier. Repeated calls accumulate.
    pub fn add_modifier(&mut self, kind: StatKind, delta: i32) {
        let entry = self.modifiers.entry(kind).or_insert(0);
        *entry = entry.saturating_add(delta);
    }

    /// Replace the battle-scoped multiplier of a stat.
    pub fn set_multiplier(&mut self, kind: StatKind, factor: f32) {
        self.multipliers.insert(kind, factor);
    }

    /// Remove the modifier and multiplier of one stat.
    pub fn clear_modifier(&mut self, kind: StatKind) {
        self.modifiers.remove(&kind);
        self.multipliers.remove(&kind);
    }

    /// Remove every battle-scoped modifier and multiplier.
    ///
    /// Base values are untouched. Current health is re-clamped because a
    /// removed MaxHealth bonus can lower the maximum below it.
    pub fn clear_battle_modifiers(&mut self) {
        self.modifiers.clear();
        self.multipliers.clear();

        let max = self.max_health();
        let health = &mut self.base[StatKind::Health.index()];
        *health = (*health).min(max);
    }

    /// Returns true while any battle-scoped layer is present.
    pub fn has_battle_modifiers(&self) -> bool {
        !self.modifiers.is_empty() || !self.multipliers.is_empty()
    }

    /// `floor(max(0, (base + modifier) × multiplier))`
    pub fn final_value(&self, kind: StatKind) -> i32 {
        let sum = i64::from(self.base(kind)) + i64::from(self.modifier(kind));
        let scaled = match self.multipliers.get(&kind) {
            Some(&factor) => (sum as f64 * f64::from(factor)).floor() as i64,
            None => sum,
        };
        scaled.clamp(0, i64::from(i32::MAX)) as i32
    }

    // ========================================================================
    // Health
    // ========================================================================

    pub fn current_health(&self) -> i32 {
        self.base(StatKind::Health)
    }

    pub fn max_health(&self) -> i32 {
        self.final_value(StatKind::MaxHealth)
    }

    pub fn is_alive(&self) -> bool {
        self.current_health() > 0
    }

    /// Current health as a fraction of maximum health (0.0 when max is 0).
    pub fn health_ratio(&self) -> f32 {
        let max = self.max_health();
        if max <= 0 {
            return 0.0;
        }
        self.current_health() as f32 / max as f32
    }

    /// Reduce current health, never below zero. Non-positive amounts are ignored.
    pub fn apply_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        let health = self.current_health().saturating_sub(amount).max(0);
        self.base[StatKind::Health.index()] = health;
        tracing::trace!(amount, health, max = self.max_health(), "damage applied");
    }

    /// Restore current health, never above maximum. Non-positive amounts are ignored.
    pub fn heal(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        let health = self
            .current_health()
            .saturating_add(amount)
            .min(self.max_health());
        self.base[StatKind::Health.index()] = health;
        tracing::trace!(amount, health, max = self.max_health(), "healed");
    }

    pub fn full_heal(&mut self) {
        self.base[StatKind::Health.index()] = self.max_health();
    }

    // ========================================================================
    // Level and experience
    // ========================================================================

    pub fn level(&self) -> i32 {
        self.base(StatKind::Level)
    }

    pub fn experience(&self) -> i32 {
        self.base(StatKind::Experience)
    }

    /// Grant experience and apply every level-up it pays for.
    ///
    /// Returns the number of levels gained. Non-positive amounts are ignored.
    pub fn add_experience(&mut self, amount: i32) -> u32 {
        if amount <= 0 {
            return 0;
        }

        let exp = &mut self.base[StatKind::Experience.index()];
        *exp = exp.saturating_add(amount);
        tracing::debug!(amount, total = *exp, "experience gained");

        let mut gained = 0;
        while self.can_level_up() {
            self.level_up();
            gained += 1;
        }
        gained
    }

    pub fn can_level_up(&self) -> bool {
        self.experience() >= experience_required(self.level())
    }

    /// Advance one level: spend the required experience, grow base stats and
    /// restore health to the new maximum.
    pub fn level_up(&mut self) -> LevelGrowth {
        let level = self.level();
        let growth = LevelGrowth::for_level(level);

        self.base[StatKind::Level.index()] = level + 1;
        self.base[StatKind::Experience.index()] -= experience_required(level);
        self.base[StatKind::MaxHealth.index()] += growth.max_health;
        self.base[StatKind::Attack.index()] += growth.attack;
        self.base[StatKind::Defense.index()] += growth.defense;
        self.base[StatKind::Speed.index()] += growth.speed;
        self.full_heal();

        tracing::info!(
            level = level + 1,
            hp = growth.max_health,
            atk = growth.attack,
            def = growth.defense,
            spd = growth.speed,
            "level up"
        );
        growth
    }

    /// Experience still missing for the next level (never negative).
    pub fn experience_to_next_level(&self) -> i32 {
        (experience_required(self.level()) - self.experience()).max(0)
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}
