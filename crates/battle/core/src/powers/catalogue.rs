use super::power::Power;

/// Result of a successful power activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUse {
    pub name: String,
    pub cost: i32,
    pub base_damage: i32,
}

/// Ordered set of powers with a mastery progression.
///
/// Mastery levels run from 1 to [`PowerCatalogue::MAX_MASTERY`]. Leaving a
/// level costs `level × 50` mastery points; points carry over between levels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerCatalogue {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    powers: Vec<Power>,
    #[cfg_attr(feature = "serde", serde(default = "initial_mastery_level"))]
    mastery_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    mastery_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    awakened: bool,
}

#[cfg(feature = "serde")]
fn initial_mastery_level() -> u32 {
    1
}

impl PowerCatalogue {
    pub const MAX_MASTERY: u32 = 10;
    pub const POINTS_PER_LEVEL: u32 = 50;

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            powers: Vec::new(),
            mastery_level: 1,
            mastery_points: 0,
            awakened: false,
        }
    }

    /// Builder-style [`PowerCatalogue::add_power`].
    pub fn with_power(mut self, power: Power) -> Self {
        self.add_power(power);
        self
    }

    pub fn add_power(&mut self, power: Power) {
        tracing::debug!(power = %power.name, catalogue = %self.name, "power added");
        self.powers.push(power);
    }

    pub fn powers(&self) -> &[Power] {
        &self.powers
    }

    pub fn power(&self, name: &str) -> Option<&Power> {
        self.powers.iter().find(|power| power.name == name)
    }

    pub fn power_mut(&mut self, name: &str) -> Option<&mut Power> {
        self.powers.iter_mut().find(|power| power.name == name)
    }

    /// Powers a combatant of `level` may pick right now.
    pub fn available(&self, level: i32) -> impl Iterator<Item = &Power> {
        self.powers
            .iter()
            .filter(move |power| level >= power.level_requirement && power.is_ready())
    }

    /// Activate `name` if it exists, is off cooldown and `resource` covers its
    /// cost. Starts the cooldown and grants one mastery point on success.
    ///
    /// The caller is responsible for deducting [`PowerUse::cost`] from the
    /// resource stat.
    pub fn try_use(&mut self, name: &str, resource: i32) -> Option<PowerUse> {
        let power = self.power_mut(name)?;
        if !power.is_ready() {
            tracing::debug!(power = name, remaining = power.current_cooldown, "power on cooldown");
            return None;
        }
        if resource < power.cost {
            tracing::debug!(power = name, resource, cost = power.cost, "not enough power");
            return None;
        }

        power.trigger();
        let used = PowerUse {
            name: power.name.clone(),
            cost: power.cost,
            base_damage: power.base_damage,
        };
        self.add_mastery_points(1);
        Some(used)
    }

    /// Let `dt` seconds elapse on every cooldown.
    pub fn tick(&mut self, dt: f32) {
        for power in &mut self.powers {
            power.tick(dt);
        }
    }

    // ========================================================================
    // Mastery
    // ========================================================================

    pub fn mastery_level(&self) -> u32 {
        self.mastery_level
    }

    pub fn mastery_points(&self) -> u32 {
        self.mastery_points
    }

    /// Add mastery points and apply every mastery level they pay for.
    /// Returns the number of levels gained.
    pub fn add_mastery_points(&mut self, points: u32) -> u32 {
        self.mastery_points = self.mastery_points.saturating_add(points);

        let mut gained = 0;
        while self.can_level_up_mastery() {
            self.level_up_mastery();
            gained += 1;
        }
        gained
    }

    pub fn can_level_up_mastery(&self) -> bool {
        self.mastery_level < Self::MAX_MASTERY
            && self.mastery_points >= self.mastery_level * Self::POINTS_PER_LEVEL
    }

    fn level_up_mastery(&mut self) {
        self.mastery_points -= self.mastery_level * Self::POINTS_PER_LEVEL;
        self.mastery_level += 1;
        tracing::info!(catalogue = %self.name, level = self.mastery_level, "mastery increased");

        if self.can_awaken() {
            tracing::info!(catalogue = %self.name, "awakening unlocked");
        }
    }

    // ========================================================================
    // Awakening
    // ========================================================================

    pub fn is_awakened(&self) -> bool {
        self.awakened
    }

    pub fn can_awaken(&self) -> bool {
        self.mastery_level >= Self::MAX_MASTERY && !self.awakened
    }

    /// One-shot transformation available at maximum mastery: damage ×1.5
    /// (floored) and cooldowns ×0.8 for every power. Returns false when not
    /// yet unlocked or already awakened.
    pub fn awaken(&mut self) -> bool {
        if !self.can_awaken() {
            return false;
        }
        self.awakened = true;
        for power in &mut self.powers {
            power.base_damage = power.base_damage * 3 / 2;
            power.cooldown *= 0.8;
        }
        tracing::info!(catalogue = %self.name, "awakened");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flame_catalogue() -> PowerCatalogue {
        PowerCatalogue::new("Flame", "fire")
            .with_power(Power::new("Fire Fist", 15, 35, 1.5))
            .with_power(Power::new("Flame Emperor", 80, 120, 12.0).with_level_requirement(12))
    }

    #[test]
    fn use_starts_cooldown_and_grants_mastery() {
        let mut catalogue = flame_catalogue();
        let used = catalogue.try_use("Fire Fist", 20).expect("usable");
        assert_eq!(used.cost, 15);
        assert_eq!(used.base_damage, 35);
        assert_eq!(catalogue.power("Fire Fist").unwrap().current_cooldown, 1.5);
        assert_eq!(catalogue.mastery_points(), 1);
    }

    #[test]
    fn use_fails_on_cooldown_missing_power_or_resource() {
        let mut catalogue = flame_catalogue();
        assert!(catalogue.try_use("Fire Fist", 10).is_none());
        assert!(catalogue.try_use("Ice Saber", 100).is_none());

        catalogue.try_use("Fire Fist", 100).unwrap();
        let cooldown = catalogue.power("Fire Fist").unwrap().current_cooldown;
        assert!(catalogue.try_use("Fire Fist", 100).is_none());
        assert_eq!(catalogue.power("Fire Fist").unwrap().current_cooldown, cooldown);
        assert_eq!(catalogue.mastery_points(), 1);
    }

    #[test]
    fn tick_clears_cooldowns() {
        let mut catalogue = flame_catalogue();
        catalogue.try_use("Fire Fist", 100).unwrap();
        catalogue.tick(1.0);
        assert!(!catalogue.power("Fire Fist").unwrap().is_ready());
        catalogue.tick(1.0);
        assert!(catalogue.power("Fire Fist").unwrap().is_ready());
    }

    #[test]
    fn available_respects_level_and_cooldown() {
        let mut catalogue = flame_catalogue();
        assert_eq!(catalogue.available(1).count(), 1);
        assert_eq!(catalogue.available(12).count(), 2);

        catalogue.try_use("Fire Fist", 100).unwrap();
        assert_eq!(catalogue.available(12).count(), 1);
    }

    #[test]
    fn mastery_levels_consume_points() {
        let mut catalogue = flame_catalogue();
        // 50 for level 1 -> 2, 100 for level 2 -> 3.
        assert_eq!(catalogue.add_mastery_points(160), 2);
        assert_eq!(catalogue.mastery_level(), 3);
        assert_eq!(catalogue.mastery_points(), 10);
    }

    #[test]
    fn mastery_caps_at_ten_and_awakens_once() {
        let mut catalogue = flame_catalogue();
        assert!(!catalogue.awaken());

        // Sum of 50 × (1..=9) = 2250 points reaches level 10.
        catalogue.add_mastery_points(10_000);
        assert_eq!(catalogue.mastery_level(), PowerCatalogue::MAX_MASTERY);

        assert!(catalogue.awaken());
        let fist = catalogue.power("Fire Fist").unwrap();
        assert_eq!(fist.base_damage, 52);
        assert!((fist.cooldown - 1.2).abs() < 1e-6);

        assert!(!catalogue.awaken());
        assert_eq!(catalogue.power("Fire Fist").unwrap().base_damage, 52);
    }
}
