/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Whether a queued `Flee` ends the battle.
    pub allow_flee: bool,

    /// Completed rounds after which the battle is lost by timeout.
    pub max_rounds: u32,

    /// Seconds a player or crew turn may wait for input before it is forfeited.
    pub turn_timeout: f32,

    /// Additive Defense granted by the `Defend` action until the battle ends.
    pub defend_bonus: i32,

    /// When set, crew members carrying a strategy decide their own action on
    /// turn entry instead of waiting for input.
    pub crew_autopilot: bool,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Lowest initiative roll added to Speed.
    pub const INITIATIVE_ROLL_MIN: u32 = 1;
    /// Highest initiative roll added to Speed.
    pub const INITIATIVE_ROLL_MAX: u32 = 20;
    /// Damage variance bounds, in percent of the raw attack value.
    pub const DAMAGE_VARIANCE_MIN: u32 = 80;
    pub const DAMAGE_VARIANCE_MAX: u32 = 120;
    /// Experience granted to an attacker per level of a combatant it defeats.
    pub const TAKEDOWN_EXP_PER_LEVEL: i32 = 25;
    /// Reward experience per enemy level on victory.
    pub const REWARD_EXP_PER_LEVEL: i64 = 20;
    /// Bounty divisor for the currency payout on victory.
    pub const BOUNTY_DIVISOR: u64 = 10;

    /// Battlefield layout used when a battle starts.
    pub const ALLY_LINE_X: f32 = 100.0;
    pub const ENEMY_LINE_X: f32 = 700.0;
    pub const LINE_START_Y: f32 = 200.0;
    pub const LINE_SPACING_Y: f32 = 80.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;
    pub const DEFAULT_TURN_TIMEOUT: f32 = 30.0;
    pub const DEFAULT_DEFEND_BONUS: i32 = 5;

    pub fn new() -> Self {
        Self {
            allow_flee: true,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            turn_timeout: Self::DEFAULT_TURN_TIMEOUT,
            defend_bonus: Self::DEFAULT_DEFEND_BONUS,
            crew_autopilot: false,
        }
    }

    pub fn with_flee(mut self, allow_flee: bool) -> Self {
        self.allow_flee = allow_flee;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_turn_timeout(mut self, seconds: f32) -> Self {
        self.turn_timeout = seconds;
        self
    }

    pub fn with_crew_autopilot(mut self, enabled: bool) -> Self {
        self.crew_autopilot = enabled;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
