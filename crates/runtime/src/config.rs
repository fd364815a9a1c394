//! Host loop settings read from the environment.
use std::env;
use std::time::Duration;

/// Runtime configuration for a [`crate::BattleSession`].
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Battle seed. `None` draws a fresh one when the session is built.
    pub seed: Option<u64>,
    /// Simulated time advanced by every tick.
    pub tick: Duration,
    /// Ticks after which a still-running battle is abandoned.
    pub max_ticks: u64,
    /// Per-topic event channel capacity.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick: Duration::from_millis(100),
            max_ticks: 100_000,
            event_capacity: 256,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Battle seed (default: random)
    /// - `BATTLE_TICK_MS` - Tick length in milliseconds (default: 100)
    /// - `BATTLE_MAX_TICKS` - Tick budget per battle (default: 100000)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(ms) = read_env::<u64>("BATTLE_TICK_MS") {
            config.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(ticks) = read_env::<u64>("BATTLE_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Configured seed, or a random one.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn tick_seconds(&self) -> f32 {
        self.tick.as_secs_f32()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_tick_a_tenth_of_a_second() {
        let config = RuntimeConfig::default();
        assert_eq!(config.tick_seconds(), 0.1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = RuntimeConfig::default().with_seed(42);
        assert_eq!(config.resolve_seed(), 42);
    }
}
