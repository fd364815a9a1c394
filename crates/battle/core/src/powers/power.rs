/// A single special action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Power {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Amount of the `Power` stat spent per use.
    pub cost: i32,
    /// Damage before the user's Attack bonus and the target's Defense.
    /// Zero for utility powers.
    pub base_damage: i32,
    /// Seconds before the power can be used again.
    pub cooldown: f32,
    /// Seconds remaining on the cooldown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_cooldown: f32,
    /// Minimum combatant level for the power to be offered.
    #[cfg_attr(feature = "serde", serde(default = "default_level_requirement"))]
    pub level_requirement: i32,
}

#[cfg(feature = "serde")]
fn default_level_requirement() -> i32 {
    1
}

impl Power {
    pub fn new(name: impl Into<String>, cost: i32, base_damage: i32, cooldown: f32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost,
            base_damage,
            cooldown,
            current_cooldown: 0.0,
            level_requirement: 1,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_level_requirement(mut self, level: i32) -> Self {
        self.level_requirement = level;
        self
    }

    /// True once the cooldown has fully elapsed.
    pub fn is_ready(&self) -> bool {
        self.current_cooldown <= 0.0
    }

    /// Start the cooldown.
    pub fn trigger(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// Let `dt` seconds of cooldown elapse.
    pub fn tick(&mut self, dt: f32) {
        self.current_cooldown = (self.current_cooldown - dt).max(0.0);
    }
}
