//! Level-up growth formulas.

/// Experience needed to advance from `level` to `level + 1`.
pub const fn experience_required(level: i32) -> i32 {
    level * 100
}

/// Base stat increases granted by a single level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelGrowth {
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl LevelGrowth {
    /// Growth for leaving `level` (the level *before* the increment).
    ///
    /// ```text
    /// MaxHealth += 15 + floor(level / 5) × 2
    /// Attack    += 2 + floor(level / 10)
    /// Defense   += 1 + floor(level / 8)
    /// Speed     += 1 + floor(level / 12)
    /// ```
    pub const fn for_level(level: i32) -> Self {
        Self {
            max_health: 15 + (level / 5) * 2,
            attack: 2 + level / 10,
            defense: 1 + level / 8,
            speed: 1 + level / 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_steps_at_thresholds() {
        assert_eq!(
            LevelGrowth::for_level(1),
            LevelGrowth {
                max_health: 15,
                attack: 2,
                defense: 1,
                speed: 1
            }
        );
        assert_eq!(
            LevelGrowth::for_level(12),
            LevelGrowth {
                max_health: 19,
                attack: 3,
                defense: 2,
                speed: 2
            }
        );
    }

    #[test]
    fn requirement_scales_with_level() {
        assert_eq!(experience_required(1), 100);
        assert_eq!(experience_required(7), 700);
    }
}
