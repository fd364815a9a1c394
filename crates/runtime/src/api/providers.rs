//! Abstraction for sourcing player and crew intent.
//!
//! The session asks an [`ActionProvider`] whenever the engine waits on input
//! for a player or crew turn, so battles can run with human input, scripted
//! fixtures, or strategy-driven autopilot.
use std::collections::{HashMap, VecDeque};

use battle_core::rng::compute_seed;
use battle_core::{
    ActionRequest, BattleEngine, CombatantId, Decision, PcgRng, RollContext, Side, StrategyConfig,
};

use super::errors::Result;

/// Trait for providing actions for the combatant that owns the current turn.
///
/// Returning `Ok(None)` means "no input yet": the engine keeps waiting and the
/// turn is eventually forfeited by the turn timeout.
pub trait ActionProvider: Send {
    /// Provide an action for `actor`.
    ///
    /// # Arguments
    /// * `actor` - The combatant whose turn it is
    /// * `engine` - Read-only view of the running battle
    fn provide_action(
        &mut self,
        actor: CombatantId,
        engine: &BattleEngine,
    ) -> Result<Option<ActionRequest>>;
}

/// Provider that never answers. Every turn it owns times out.
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn provide_action(
        &mut self,
        _actor: CombatantId,
        _engine: &BattleEngine,
    ) -> Result<Option<ActionRequest>> {
        Ok(None)
    }
}

/// Replays a fixed list of actions per combatant, in order.
///
/// Once a combatant's script runs out it waits, like [`WaitActionProvider`].
#[derive(Default)]
pub struct ScriptedActionProvider {
    scripts: HashMap<CombatantId, VecDeque<ActionRequest>>,
}

impl ScriptedActionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `request` to its actor's script.
    pub fn push(&mut self, request: ActionRequest) {
        self.scripts
            .entry(request.actor)
            .or_default()
            .push_back(request);
    }

    pub fn with(mut self, request: ActionRequest) -> Self {
        self.push(request);
        self
    }

    /// Actions still waiting to be played.
    pub fn remaining(&self) -> usize {
        self.scripts.values().map(VecDeque::len).sum()
    }
}

impl ActionProvider for ScriptedActionProvider {
    fn provide_action(
        &mut self,
        actor: CombatantId,
        _engine: &BattleEngine,
    ) -> Result<Option<ActionRequest>> {
        Ok(self
            .scripts
            .get_mut(&actor)
            .and_then(VecDeque::pop_front))
    }
}

/// Picks actions with the actor's [`StrategyConfig`], or `fallback` when the
/// actor carries none.
///
/// Providers can only queue actions, so an out-of-range decision becomes an
/// attack on the chosen target from the current position.
pub struct StrategyActionProvider {
    fallback: StrategyConfig,
    rng: PcgRng,
    seed: u64,
    nonce: u64,
}

impl StrategyActionProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            fallback: StrategyConfig::enemy_default(),
            rng: PcgRng,
            seed,
            nonce: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: StrategyConfig) -> Self {
        self.fallback = fallback;
        self
    }
}

impl ActionProvider for StrategyActionProvider {
    fn provide_action(
        &mut self,
        actor: CombatantId,
        engine: &BattleEngine,
    ) -> Result<Option<ActionRequest>> {
        let Some(combatant) = engine.combatant(actor) else {
            return Ok(None);
        };

        // Whole opposing roster in slot order; `decide` skips the dead.
        let side = actor.side.opposite();
        let roster = match side {
            Side::Ally => engine.allies(),
            Side::Enemy => engine.enemies(),
        };
        let targets: Vec<_> = roster
            .iter()
            .enumerate()
            .map(|(index, target)| (CombatantId { side, index }, target))
            .collect();

        let strategy = combatant.strategy.as_ref().unwrap_or(&self.fallback);
        let seed = compute_seed(
            self.seed,
            self.nonce,
            actor.rng_key(),
            RollContext::TargetChoice,
        );
        self.nonce += 1;

        let request = match strategy.decide(actor, combatant, &targets, &self.rng, seed) {
            Some(Decision::Act(request)) => Some(request),
            Some(Decision::Approach { target, .. }) => Some(
                ActionRequest::attack(actor, target)
                    .with_bonus(strategy.damage_bonus)
                    .with_priority(strategy.priority),
            ),
            None => None,
        };
        tracing::debug!(%actor, ?request, "strategy provider decided");
        Ok(request)
    }
}
