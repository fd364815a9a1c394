//! Decision strategies for combatants that act without external input.
//!
//! Every non-player policy is the same function, [`StrategyConfig::decide`],
//! driven by a small data record. Presets reproduce the stock enemy and crew
//! behaviours.

use crate::action::ActionRequest;
use crate::combatant::{Combatant, CombatantId};
use crate::rng::RngOracle;

/// How a strategy picks its target among the living opponents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetRule {
    /// Smallest Euclidean distance; ties resolve to the earliest target.
    Nearest,
    /// Roster slot 0 only; no decision once it is down.
    First,
    /// Uniform roll over living targets.
    #[default]
    Random,
}

/// Outcome of a strategy evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Queue this action for the current round.
    Act(ActionRequest),
    /// Target is out of engage range: move up to `step` units toward it and
    /// queue nothing.
    Approach { target: CombatantId, step: f32 },
}

/// Parameters of the heuristic decision policy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrategyConfig {
    pub target: TargetRule,
    /// Attack only when the target is strictly closer than this. `None`
    /// attacks from any distance.
    pub engage_range: Option<f32>,
    pub damage_bonus: i32,
    /// Scales the combatant's move speed for approach steps.
    pub speed_multiplier: f32,
    pub priority: i32,
}

impl StrategyConfig {
    /// Random target, any range, priority 5.
    pub fn enemy_default() -> Self {
        Self {
            target: TargetRule::Random,
            engage_range: None,
            damage_bonus: 0,
            speed_multiplier: 1.0,
            priority: 5,
        }
    }

    /// Closes in on the nearest opponent and strikes hard up close.
    pub fn swordsman() -> Self {
        Self {
            target: TargetRule::Nearest,
            engage_range: Some(50.0),
            damage_bonus: 5,
            speed_multiplier: 1.2,
            priority: 0,
        }
    }

    /// Attacks the first opponent from any distance.
    pub fn navigator() -> Self {
        Self {
            target: TargetRule::First,
            engage_range: None,
            damage_bonus: 0,
            speed_multiplier: 1.0,
            priority: 0,
        }
    }

    /// Rushes the first opponent and kicks at close range.
    pub fn brawler() -> Self {
        Self {
            target: TargetRule::First,
            engage_range: Some(40.0),
            damage_bonus: 3,
            speed_multiplier: 1.4,
            priority: 0,
        }
    }

    /// Evaluate the policy for `actor` against candidate `targets`.
    ///
    /// Dead candidates are ignored. Returns `None` when no living target
    /// exists, or for [`TargetRule::First`] when slot 0 is down. `seed` is
    /// only consumed by [`TargetRule::Random`].
    pub fn decide<R>(
        &self,
        actor_id: CombatantId,
        actor: &Combatant,
        targets: &[(CombatantId, &Combatant)],
        rng: &R,
        seed: u64,
    ) -> Option<Decision>
    where
        R: RngOracle + ?Sized,
    {
        let living: Vec<&(CombatantId, &Combatant)> =
            targets.iter().filter(|(_, target)| target.is_alive()).collect();

        let (target_id, target) = match self.target {
            TargetRule::First => targets.first().filter(|(_, target)| target.is_alive())?,
            TargetRule::Random => {
                if living.is_empty() {
                    return None;
                }
                living[rng.pick(seed, living.len())]
            }
            TargetRule::Nearest => living.iter().copied().min_by(|(_, a), (_, b)| {
                actor
                    .distance_to(a)
                    .partial_cmp(&actor.distance_to(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?,
        };

        let distance = actor.distance_to(target);
        let in_range = self.engage_range.is_none_or(|range| distance < range);

        if in_range {
            Some(Decision::Act(
                ActionRequest::attack(actor_id, *target_id)
                    .with_bonus(self.damage_bonus)
                    .with_priority(self.priority),
            ))
        } else {
            Some(Decision::Approach {
                target: *target_id,
                step: actor.move_speed * self.speed_multiplier,
            })
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::enemy_default()
    }
}
