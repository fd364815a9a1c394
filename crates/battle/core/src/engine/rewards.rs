use crate::combatant::{CombatantId, Roster};
use crate::config::BattleConfig;
use crate::rng::RngOracle;

use super::BattleEngine;

/// Victory payout totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: i64,
    pub currency: u64,
}

impl Rewards {
    /// `Σ level × 20` experience and `Σ bounty / 10` currency over every
    /// enemy, defeated or not.
    pub fn for_enemies(enemies: &Roster) -> Self {
        enemies.iter().fold(Rewards::default(), |acc, enemy| Rewards {
            experience: acc.experience
                + i64::from(enemy.level()) * BattleConfig::REWARD_EXP_PER_LEVEL,
            currency: acc.currency + enemy.bounty / BattleConfig::BOUNTY_DIVISOR,
        })
    }

    /// Experience each of `recipients` receives. The remainder of the integer
    /// division is discarded.
    pub fn experience_share(&self, recipients: usize) -> i64 {
        if recipients == 0 {
            return 0;
        }
        self.experience / recipients as i64
    }
}

impl<R: RngOracle> BattleEngine<R> {
    /// Compute victory rewards and split the experience evenly among living
    /// allies.
    pub(super) fn distribute_rewards(&mut self) {
        let rewards = Rewards::for_enemies(&self.enemies);
        self.rewards = rewards;

        let recipients: Vec<CombatantId> = self
            .allies
            .alive_indices()
            .map(CombatantId::ally)
            .collect();
        let share = rewards.experience_share(recipients.len());
        let share = i32::try_from(share).unwrap_or(i32::MAX);

        tracing::info!(
            experience = rewards.experience,
            currency = rewards.currency,
            recipients = recipients.len(),
            share,
            "rewards distributed"
        );
        for id in recipients {
            self.grant_experience(id, share);
        }
    }
}
