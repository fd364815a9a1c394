//! Combatants and the rosters that own them.
//!
//! A [`Combatant`] bundles a stat block, an optional power catalogue and an
//! optional decision strategy. During a battle combatants live inside the
//! engine's two [`Roster`]s and are addressed by [`CombatantId`].

mod id;
mod roster;

pub use id::{CombatantId, Side};
pub use roster::Roster;

use crate::powers::{PowerCatalogue, PowerUse};
use crate::stats::{StatBlock, StatKind};
use crate::strategy::StrategyConfig;

/// Category used to pick the turn phase of an ally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatantKind {
    /// Controlled through external input.
    Player,
    /// Ally that may act on its own strategy.
    CrewMember,
    Enemy,
}

/// 2-D battlefield position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move up to `max_step` units toward `target`, never past it.
    pub fn step_toward(self, target: Position, max_step: f32) -> Position {
        let distance = self.distance_to(target);
        if distance <= max_step.max(0.0) || distance <= f32::EPSILON {
            return target;
        }
        let ratio = max_step.max(0.0) / distance;
        Position {
            x: self.x + (target.x - self.x) * ratio,
            y: self.y + (target.y - self.y) * ratio,
        }
    }
}

/// A single participant in a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub title: Option<String>,
    pub kind: CombatantKind,
    pub stats: StatBlock,
    pub powers: Option<PowerCatalogue>,
    /// Currency value; a tenth of it is paid out when defeated as an enemy.
    pub bounty: u64,
    pub position: Position,
    /// Units covered by one approach step.
    pub move_speed: f32,
    pub strategy: Option<StrategyConfig>,
    stun_timer: f32,
    engaged: bool,
    power_regen_carry: f32,
}

impl Combatant {
    pub const DEFAULT_MOVE_SPEED: f32 = 100.0;
    /// Power stat regained per second of battle time.
    pub const POWER_REGEN_PER_SECOND: f32 = 5.0;
    /// Regeneration stops at `level × POWER_CAP_PER_LEVEL`.
    pub const POWER_CAP_PER_LEVEL: i32 = 10;

    pub fn new(name: impl Into<String>, kind: CombatantKind) -> Self {
        Self {
            name: name.into(),
            title: None,
            kind,
            stats: StatBlock::new(),
            powers: None,
            bounty: 0,
            position: Position::default(),
            move_speed: Self::DEFAULT_MOVE_SPEED,
            strategy: None,
            stun_timer: 0.0,
            engaged: false,
            power_regen_carry: 0.0,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::Player)
    }

    pub fn crew(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::CrewMember)
    }

    /// An enemy driven by [`StrategyConfig::enemy_default`].
    pub fn enemy(name: impl Into<String>) -> Self {
        Self::new(name, CombatantKind::Enemy).with_strategy(StrategyConfig::enemy_default())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    /// Set a base stat through [`StatBlock::set_base`].
    pub fn with_base(mut self, kind: StatKind, value: i32) -> Self {
        self.stats.set_base(kind, value);
        self
    }

    pub fn with_powers(mut self, catalogue: PowerCatalogue) -> Self {
        self.powers = Some(catalogue);
        self
    }

    pub fn with_bounty(mut self, bounty: u64) -> Self {
        self.bounty = bounty;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    // ========================================================================
    // State queries
    // ========================================================================

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    /// Alive and not stunned.
    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.is_stunned()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn level(&self) -> i32 {
        self.stats.level()
    }

    pub fn distance_to(&self, other: &Combatant) -> f32 {
        self.position.distance_to(other.position)
    }

    /// Name with the title appended, e.g. `Zoro "Pirate Hunter"`.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} \"{}\"", self.name, title),
            None => self.name.clone(),
        }
    }

    // ========================================================================
    // Battle mutation
    // ========================================================================

    /// Stun for at least `seconds`; a longer running stun is kept.
    pub fn stun(&mut self, seconds: f32) {
        self.stun_timer = self.stun_timer.max(seconds);
    }

    pub(crate) fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
        if !engaged {
            self.stun_timer = 0.0;
            self.power_regen_carry = 0.0;
        }
    }

    /// Advance per-combatant timers by `dt` seconds: power cooldowns, power
    /// regeneration and the stun timer.
    pub fn tick(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        if let Some(catalogue) = self.powers.as_mut() {
            catalogue.tick(dt);
            self.regenerate_power(dt);
        }

        if self.stun_timer > 0.0 {
            self.stun_timer = (self.stun_timer - dt).max(0.0);
        }
    }

    fn regenerate_power(&mut self, dt: f32) {
        let cap = self.level() * Self::POWER_CAP_PER_LEVEL;
        let current = self.stats.final_value(StatKind::Power);
        if current >= cap {
            self.power_regen_carry = 0.0;
            return;
        }

        self.power_regen_carry += Self::POWER_REGEN_PER_SECOND * dt;
        let whole = self.power_regen_carry.floor();
        if whole < 1.0 {
            return;
        }
        self.power_regen_carry -= whole;

        let gain = (whole as i32).min(cap - current);
        self.stats.add_modifier(StatKind::Power, gain);
    }

    /// Take a hit of `raw` strength: the target's Defense absorbs half its
    /// value, and at least one point always lands. Returns the damage dealt.
    pub fn take_hit(&mut self, raw: i32) -> i32 {
        let mitigation = self.stats.final_value(StatKind::Defense) / 2;
        let dealt = raw.saturating_sub(mitigation).max(1);
        self.stats.apply_damage(dealt);
        dealt
    }

    /// Activate a power from the catalogue, paying its cost out of the Power
    /// stat as a battle-scoped modifier. Returns `None` when the combatant
    /// cannot act, has no catalogue, or the power is unknown, cooling down or
    /// unaffordable.
    pub fn activate_power(&mut self, name: &str) -> Option<PowerUse> {
        if !self.can_act() {
            return None;
        }
        let resource = self.stats.final_value(StatKind::Power);
        let used = self.powers.as_mut()?.try_use(name, resource)?;
        self.stats.add_modifier(StatKind::Power, -used.cost);
        Some(used)
    }
}
