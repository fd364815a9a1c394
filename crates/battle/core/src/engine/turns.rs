use crate::combatant::{CombatantId, CombatantKind, Side};
use crate::config::BattleConfig;
use crate::events::BattleEvent;
use crate::rng::{RngOracle, RollContext};
use crate::stats::StatKind;
use crate::strategy::{Decision, StrategyConfig};

use super::{BattleEngine, BattlePhase};

/// One slot of a round's turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrderEntry {
    pub id: CombatantId,
    /// Final Speed plus a d20 roll, fixed for the round.
    pub initiative: i32,
    /// Set once an action is queued or the turn is forfeited.
    pub has_acted: bool,
}

/// Turn sequencing for BattleEngine.
impl<R: RngOracle> BattleEngine<R> {
    /// Roll initiative for every living combatant and sort the round.
    ///
    /// The sort is stable, so ties keep allies before enemies and roster
    /// order within a side.
    pub(super) fn compute_turn_order(&mut self) {
        let mut order = Vec::new();
        for id in self.all_ids() {
            let Some(speed) = self
                .combatant(id)
                .filter(|combatant| combatant.is_alive())
                .map(|combatant| combatant.stats.final_value(StatKind::Speed))
            else {
                continue;
            };

            let roll = self.roll(
                id,
                RollContext::Initiative,
                BattleConfig::INITIATIVE_ROLL_MIN,
                BattleConfig::INITIATIVE_ROLL_MAX,
            );
            order.push(TurnOrderEntry {
                id,
                initiative: speed.saturating_add(roll as i32),
                has_acted: false,
            });
        }

        order.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        tracing::debug!(
            round = self.round + 1,
            order = ?order.iter().map(|entry| (entry.id, entry.initiative)).collect::<Vec<_>>(),
            "turn order"
        );

        self.turn_order = order;
        self.turn_index = 0;
    }

    /// Phase a combatant's turn is played in.
    pub(super) fn turn_phase_for(&self, id: CombatantId) -> BattlePhase {
        match id.side {
            Side::Enemy => BattlePhase::EnemyTurn,
            Side::Ally => match self.combatant(id).map(|combatant| combatant.kind) {
                Some(CombatantKind::Player) => BattlePhase::PlayerTurn,
                _ => BattlePhase::CrewTurn,
            },
        }
    }

    /// `TurnOrder` step: skip the dead, hand the turn to the next combatant,
    /// or close the round once everyone has had a turn.
    pub(super) fn step_turn_order(&mut self) {
        let Some(entry) = self.turn_order.get(self.turn_index).copied() else {
            self.finish_round();
            return;
        };

        if !self.combatant(entry.id).is_some_and(|combatant| combatant.is_alive()) {
            tracing::trace!(actor = %entry.id, "skipping defeated combatant");
            self.turn_index += 1;
            return;
        }

        let phase = self.turn_phase_for(entry.id);
        self.enter_phase(phase);

        let autopilot = phase == BattlePhase::CrewTurn
            && self.config.crew_autopilot
            && self
                .combatant(entry.id)
                .is_some_and(|combatant| combatant.strategy.is_some());
        if phase == BattlePhase::EnemyTurn || autopilot {
            self.run_strategy(entry.id);
        }
    }

    /// `PlayerTurn`/`CrewTurn` step: advance once the actor has queued,
    /// forfeit the turn when the timeout elapses.
    pub(super) fn step_input_turn(&mut self) {
        let Some(entry) = self.turn_order.get_mut(self.turn_index) else {
            self.enter_phase(BattlePhase::TurnOrder);
            return;
        };

        if entry.has_acted {
            self.advance_turn();
        } else if self.turn_timer >= self.config.turn_timeout {
            entry.has_acted = true;
            tracing::warn!(
                actor = %entry.id,
                timeout = self.config.turn_timeout,
                "turn timed out; forfeiting"
            );
            self.advance_turn();
        }
    }

    pub(super) fn advance_turn(&mut self) {
        self.turn_index += 1;
        self.enter_phase(BattlePhase::TurnOrder);
    }

    /// Close the round: resolve the queue, then either end the battle or roll
    /// the next turn order.
    fn finish_round(&mut self) {
        self.round += 1;
        tracing::debug!(round = self.round, queued = self.queue.len(), "resolving round");

        self.resolve_actions();
        if self.is_ended() {
            return;
        }

        if self.allies.all_defeated() {
            self.end_battle(false);
        } else if self.enemies.all_defeated() {
            self.end_battle(true);
        } else if self.round >= self.config.max_rounds {
            self.emit(BattleEvent::message("Battle reached turn limit!"));
            tracing::info!(max_rounds = self.config.max_rounds, "round limit reached");
            self.end_battle(false);
        } else {
            self.compute_turn_order();
            self.enter_phase(BattlePhase::TurnOrder);
        }
    }

    /// Let the combatant's strategy pick its action for this turn.
    ///
    /// Enemies without a strategy use [`StrategyConfig::enemy_default`].
    fn run_strategy(&mut self, id: CombatantId) {
        let can_act = self.combatant(id).is_some_and(|combatant| combatant.can_act());
        if !can_act {
            tracing::debug!(actor = %id, "cannot act; turn passes");
            return;
        }

        let seed = self.next_seed(id, RollContext::TargetChoice);
        let Some(actor) = self.combatant(id) else {
            return;
        };
        let strategy = actor
            .strategy
            .clone()
            .unwrap_or_else(StrategyConfig::enemy_default);

        let target_side = id.side.opposite();
        let targets: Vec<_> = self
            .roster(target_side)
            .iter()
            .enumerate()
            .map(|(index, combatant)| (CombatantId { side: target_side, index }, combatant))
            .collect();

        let decision = strategy.decide(id, actor, &targets, &self.rng, seed);
        match decision {
            None => tracing::debug!(actor = %id, "no living targets"),
            Some(Decision::Act(request)) => {
                if let Err(error) = self.queue_action(request) {
                    tracing::warn!(actor = %id, %error, "strategy action rejected");
                }
            }
            Some(Decision::Approach { target, step }) => self.approach(id, target, step),
        }
    }

    fn approach(&mut self, id: CombatantId, target: CombatantId, step: f32) {
        let Some(destination) = self.combatant(target).map(|combatant| combatant.position) else {
            return;
        };
        if let Some(actor) = self.combatant_mut(id) {
            actor.position = actor.position.step_toward(destination, step);
            tracing::debug!(
                actor = %id,
                %target,
                x = actor.position.x,
                y = actor.position.y,
                "approaching"
            );
        }
        if let Some(entry) = self.turn_order.get_mut(self.turn_index) {
            entry.has_acted = true;
        }
    }
}
