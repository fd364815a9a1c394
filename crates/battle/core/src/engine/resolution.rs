use crate::action::{ActionKind, ActionRequest};
use crate::combatant::{CombatantId, CombatantKind, Side};
use crate::config::BattleConfig;
use crate::events::BattleEvent;
use crate::rng::{RngOracle, RollContext};
use crate::stats::StatKind;

use super::BattleEngine;

/// Round resolution for BattleEngine.
impl<R: RngOracle> BattleEngine<R> {
    /// Execute the queued actions, highest priority first.
    ///
    /// Actions of combatants that died earlier in the pass are dropped, and
    /// once the battle has ended (a successful flee) the rest of the queue is
    /// discarded.
    pub(super) fn resolve_actions(&mut self) {
        let mut queue = std::mem::take(&mut self.queue);
        queue.sort_by(|a, b| b.priority.cmp(&a.priority));

        for action in queue {
            if self.is_ended() {
                tracing::debug!(actor = %action.actor, "battle over; action discarded");
                continue;
            }
            if !self
                .combatant(action.actor)
                .is_some_and(|combatant| combatant.is_alive())
            {
                continue;
            }
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: ActionRequest) {
        let actor = action.actor;
        match action.kind {
            ActionKind::Attack => self.resolve_attack(actor, action.target, action.bonus),
            ActionKind::Defend => self.resolve_defend(actor),
            ActionKind::UsePower { power } => self.resolve_power(actor, &power, action.target),
            ActionKind::UseItem { item } => {
                tracing::info!(actor = %actor, item, "item use delegated to inventory");
            }
            ActionKind::Flee => self.resolve_flee(actor),
        }
    }

    fn resolve_attack(&mut self, actor: CombatantId, target: Option<CombatantId>, bonus: i32) {
        let Some(target) = target else {
            tracing::debug!(actor = %actor, "attack without target");
            return;
        };
        if !self.combatant(target).is_some_and(|combatant| combatant.is_alive()) {
            tracing::debug!(actor = %actor, %target, "attack target already down");
            return;
        }
        let Some(attack) = self
            .combatant(actor)
            .map(|combatant| combatant.stats.final_value(StatKind::Attack))
        else {
            return;
        };

        let raw = attack.saturating_add(bonus);
        let variance = self.roll(
            actor,
            RollContext::DamageVariance,
            BattleConfig::DAMAGE_VARIANCE_MIN,
            BattleConfig::DAMAGE_VARIANCE_MAX,
        );
        let scaled = (i64::from(raw) * i64::from(variance)).div_euclid(100) as i32;

        let dealt = self.strike(actor, target, scaled);
        let text = format!(
            "{} attacks {} for {} damage!",
            self.name_of(actor),
            self.name_of(target),
            dealt
        );
        self.emit(BattleEvent::Message(text));
    }

    fn resolve_defend(&mut self, actor: CombatantId) {
        let bonus = self.config.defend_bonus;
        let Some(combatant) = self.combatant_mut(actor) else {
            return;
        };
        combatant.stats.add_modifier(StatKind::Defense, bonus);
        let text = format!("{} takes a defensive stance!", combatant.name);
        self.emit(BattleEvent::Message(text));
    }

    fn resolve_power(&mut self, actor: CombatantId, power: &str, target: Option<CombatantId>) {
        let Some(user) = self.combatant_mut(actor) else {
            return;
        };
        let Some(used) = user.activate_power(power) else {
            tracing::debug!(actor = %actor, power, "power use failed");
            return;
        };
        let attack = user.stats.final_value(StatKind::Attack);

        let text = format!("{} uses {}!", user.name, used.name);
        self.emit(BattleEvent::Message(text));
        self.emit(BattleEvent::PowerUsed {
            actor,
            power: used.name.clone(),
        });

        if used.base_damage <= 0 {
            return;
        }
        let Some(target) = target else {
            return;
        };
        if self.combatant(target).is_some_and(|combatant| combatant.is_alive()) {
            self.strike(actor, target, used.base_damage.saturating_add(attack / 4));
        }
    }

    fn resolve_flee(&mut self, actor: CombatantId) {
        if !self.config.allow_flee {
            let text = format!("{} couldn't escape!", self.name_of(actor));
            self.emit(BattleEvent::Message(text));
            return;
        }

        let text = format!("{} fled from battle!", self.name_of(actor));
        self.emit(BattleEvent::Message(text));
        // The fleeing side loses.
        self.end_battle(actor.side == Side::Enemy);
    }

    /// Land a hit of `raw` strength on `target` and emit the damage event.
    /// A takedown by the player grants `target level × 25` experience; other
    /// attackers only earn through the victory reward.
    fn strike(&mut self, attacker: CombatantId, target: CombatantId, raw: i32) -> i32 {
        let Some(victim) = self.combatant_mut(target) else {
            return 0;
        };
        let dealt = victim.take_hit(raw);
        let takedown = (!victim.is_alive()).then(|| (victim.level(), victim.name.clone()));

        self.emit(BattleEvent::DamageDealt {
            target,
            amount: dealt,
        });
        tracing::debug!(%attacker, %target, raw, dealt, "hit");

        if let Some((level, name)) = takedown {
            self.emit(BattleEvent::Message(format!("{name} is defeated!")));
            let by_player = attacker.side == Side::Ally
                && self
                    .combatant(attacker)
                    .is_some_and(|combatant| combatant.kind == CombatantKind::Player);
            if by_player {
                let experience = level.saturating_mul(BattleConfig::TAKEDOWN_EXP_PER_LEVEL);
                self.grant_experience(attacker, experience);
            }
        }
        dealt
    }

    /// Add experience to one combatant, emitting a level-up event per level.
    pub(super) fn grant_experience(&mut self, id: CombatantId, amount: i32) {
        let Some(combatant) = self.combatant_mut(id) else {
            return;
        };
        let before = combatant.level();
        let gained = combatant.stats.add_experience(amount);
        let name = combatant.name.clone();

        for level in (before + 1)..=(before + gained as i32) {
            self.emit(BattleEvent::LevelUp {
                combatant: id,
                level,
            });
            self.emit(BattleEvent::Message(format!("{name} reached level {level}!")));
        }
    }

    fn name_of(&self, id: CombatantId) -> String {
        self.combatant(id)
            .map(|combatant| combatant.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
