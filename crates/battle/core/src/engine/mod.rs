//! Battle state machine.
//!
//! The [`BattleEngine`] owns both rosters for the duration of a battle and is
//! the only path through which combatants change while it runs. Hosts drive
//! it with [`BattleEngine::update`], submit input with
//! [`BattleEngine::queue_action`] and drain narration and notifications with
//! [`BattleEngine::drain_events`].
//!
//! A round has two halves: every living combatant gets one turn phase in
//! initiative order to submit an action, then the whole queue is resolved in
//! priority order and the end conditions are checked.

mod errors;
mod phase;
mod resolution;
mod rewards;
mod turns;

pub use errors::{QueueError, SetupError};
pub use phase::{BattleOutcome, BattlePhase};
pub use rewards::Rewards;
pub use turns::TurnOrderEntry;

use crate::action::ActionRequest;
use crate::combatant::{Combatant, CombatantId, Position, Roster, Side};
use crate::config::BattleConfig;
use crate::events::BattleEvent;
use crate::rng::{PcgRng, RngOracle, RollContext, compute_seed};
use crate::summary::{BattleSummary, SUMMARY_VERSION};

/// Turn-based battle between an ally roster and an enemy roster.
pub struct BattleEngine<R: RngOracle = PcgRng> {
    config: BattleConfig,
    rng: R,
    seed: u64,
    nonce: u64,

    allies: Roster,
    enemies: Roster,

    phase: BattlePhase,
    turn_order: Vec<TurnOrderEntry>,
    turn_index: usize,
    turn_timer: f32,
    round: u32,
    queue: Vec<ActionRequest>,

    outcome: Option<BattleOutcome>,
    rewards: Rewards,
    events: Vec<BattleEvent>,
}

impl BattleEngine<PcgRng> {
    /// Creates an engine with the default PCG oracle.
    pub fn new(config: BattleConfig, seed: u64) -> Self {
        Self::with_rng(config, PcgRng, seed)
    }
}

impl<R: RngOracle> BattleEngine<R> {
    pub fn with_rng(config: BattleConfig, rng: R, seed: u64) -> Self {
        Self {
            config,
            rng,
            seed,
            nonce: 0,
            allies: Roster::new(),
            enemies: Roster::new(),
            phase: BattlePhase::Setup,
            turn_order: Vec::new(),
            turn_index: 0,
            turn_timer: 0.0,
            round: 0,
            queue: Vec::new(),
            outcome: None,
            rewards: Rewards::default(),
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Setup
    // ========================================================================

    pub fn add_ally(&mut self, combatant: Combatant) -> Result<CombatantId, SetupError> {
        self.ensure_setup()?;
        Ok(CombatantId::ally(self.allies.push(combatant)))
    }

    pub fn add_enemy(&mut self, combatant: Combatant) -> Result<CombatantId, SetupError> {
        self.ensure_setup()?;
        Ok(CombatantId::enemy(self.enemies.push(combatant)))
    }

    /// Replace both rosters at once.
    pub fn set_rosters(&mut self, allies: Roster, enemies: Roster) -> Result<(), SetupError> {
        self.ensure_setup()?;
        self.allies = allies;
        self.enemies = enemies;
        Ok(())
    }

    fn ensure_setup(&self) -> Result<(), SetupError> {
        if self.phase == BattlePhase::Setup {
            Ok(())
        } else {
            Err(SetupError::AlreadyStarted { phase: self.phase })
        }
    }

    /// Start the battle: lay out the field, engage every combatant and roll
    /// the first turn order. Fails without changing state when either roster
    /// is empty.
    pub fn start_battle(&mut self) -> Result<(), SetupError> {
        let checked = self.ensure_setup().and_then(|()| {
            if self.allies.is_empty() {
                Err(SetupError::NoAllies)
            } else if self.enemies.is_empty() {
                Err(SetupError::NoEnemies)
            } else {
                Ok(())
            }
        });
        if let Err(error) = checked {
            tracing::error!(%error, "cannot start battle");
            return Err(error);
        }

        lay_out_line(&mut self.allies, BattleConfig::ALLY_LINE_X);
        lay_out_line(&mut self.enemies, BattleConfig::ENEMY_LINE_X);
        for combatant in self.allies.iter_mut().chain(self.enemies.iter_mut()) {
            combatant.set_engaged(true);
        }

        self.round = 0;
        self.outcome = None;
        self.rewards = Rewards::default();
        self.queue.clear();

        self.compute_turn_order();
        self.enter_phase(BattlePhase::TurnOrder);
        self.emit(BattleEvent::message("Battle begins!"));

        tracing::info!(
            allies = self.allies.len(),
            enemies = self.enemies.len(),
            seed = self.seed,
            "battle started"
        );
        Ok(())
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the battle by `dt` seconds.
    ///
    /// Ticks every combatant, then performs at most one phase step. Does
    /// nothing before the battle starts or after it ends.
    pub fn update(&mut self, dt: f32) {
        if !self.is_active() {
            return;
        }

        for combatant in self.allies.iter_mut().chain(self.enemies.iter_mut()) {
            combatant.tick(dt);
        }
        self.turn_timer += dt;

        match self.phase {
            BattlePhase::TurnOrder => self.step_turn_order(),
            BattlePhase::PlayerTurn | BattlePhase::CrewTurn => self.step_input_turn(),
            BattlePhase::EnemyTurn => self.advance_turn(),
            BattlePhase::Setup | BattlePhase::Victory | BattlePhase::Defeat => {}
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Submit an action for the combatant whose turn it is.
    pub fn queue_action(&mut self, request: ActionRequest) -> Result<(), QueueError> {
        let result = self.validate_request(&request);
        if let Err(error) = &result {
            tracing::debug!(actor = %request.actor, %error, "action rejected");
            return result;
        }

        if let Some(entry) = self.turn_order.get_mut(self.turn_index) {
            entry.has_acted = true;
        }
        tracing::debug!(
            actor = %request.actor,
            kind = %request.kind,
            target = ?request.target,
            priority = request.priority,
            "action queued"
        );
        self.queue.push(request);
        Ok(())
    }

    fn validate_request(&self, request: &ActionRequest) -> Result<(), QueueError> {
        if !self.is_active() {
            return Err(QueueError::NotActive { phase: self.phase });
        }

        let actor_id = request.actor;
        let actor = self
            .combatant(actor_id)
            .ok_or(QueueError::UnknownActor(actor_id))?;
        if !actor.is_alive() {
            return Err(QueueError::ActorDefeated(actor_id));
        }
        if actor.is_stunned() {
            return Err(QueueError::ActorStunned(actor_id));
        }
        if let Some(target) = request.target {
            if self.combatant(target).is_none() {
                return Err(QueueError::UnknownTarget(target));
            }
        }

        let current = self.current_actor();
        if current != Some(actor_id) {
            return Err(QueueError::NotCurrentActor {
                actor: actor_id,
                current,
            });
        }
        if self.phase != self.turn_phase_for(actor_id) {
            return Err(QueueError::WrongPhase {
                actor: actor_id,
                phase: self.phase,
            });
        }
        if self
            .turn_order
            .get(self.turn_index)
            .is_some_and(|entry| entry.has_acted)
        {
            return Err(QueueError::AlreadyActed(actor_id));
        }
        Ok(())
    }

    // ========================================================================
    // Termination
    // ========================================================================

    /// End the battle immediately.
    ///
    /// Clears every battle-scoped modifier, disengages all combatants,
    /// distributes rewards on victory and emits [`BattleEvent::BattleEnded`].
    /// Ignored unless the battle is running.
    pub fn end_battle(&mut self, victory: bool) {
        if !self.is_active() {
            tracing::debug!(phase = %self.phase, "end_battle ignored");
            return;
        }

        let outcome = BattleOutcome::from_victory(victory);
        self.outcome = Some(outcome);
        self.phase = outcome.phase();
        self.turn_timer = 0.0;
        self.queue.clear();

        for combatant in self.allies.iter_mut().chain(self.enemies.iter_mut()) {
            combatant.stats.clear_battle_modifiers();
            combatant.set_engaged(false);
        }

        if victory {
            self.distribute_rewards();
            self.emit(BattleEvent::message("Victory!"));
        } else {
            self.emit(BattleEvent::message("Defeat..."));
        }
        self.emit(BattleEvent::BattleEnded { victory });

        tracing::info!(
            %outcome,
            round = self.round,
            experience = self.rewards.experience,
            currency = self.rewards.currency,
            "battle ended"
        );
    }

    /// Reset to `Setup`, handing both rosters back to the caller.
    pub fn clear(&mut self) -> (Roster, Roster) {
        for combatant in self.allies.iter_mut().chain(self.enemies.iter_mut()) {
            combatant.set_engaged(false);
        }

        self.phase = BattlePhase::Setup;
        self.turn_order.clear();
        self.turn_index = 0;
        self.turn_timer = 0.0;
        self.round = 0;
        self.queue.clear();
        self.outcome = None;
        self.rewards = Rewards::default();
        self.events.clear();

        (
            std::mem::take(&mut self.allies),
            std::mem::take(&mut self.enemies),
        )
    }

    /// Consume the engine and release both rosters.
    pub fn into_rosters(self) -> (Roster, Roster) {
        (self.allies, self.enemies)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Completed rounds.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_order(&self) -> &[TurnOrderEntry] {
        &self.turn_order
    }

    /// Seconds spent in the current phase.
    pub fn turn_timer(&self) -> f32 {
        self.turn_timer
    }

    /// Started and not yet ended.
    pub fn is_active(&self) -> bool {
        self.phase != BattlePhase::Setup && !self.phase.is_terminal()
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Totals computed on victory; zero otherwise.
    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn allies(&self) -> &Roster {
        &self.allies
    }

    pub fn enemies(&self) -> &Roster {
        &self.enemies
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster(id.side).get(id.index)
    }

    /// Combatant owning the current turn phase.
    pub fn current_actor(&self) -> Option<CombatantId> {
        if !self.phase.is_turn() {
            return None;
        }
        self.turn_order.get(self.turn_index).map(|entry| entry.id)
    }

    /// Living combatants `actor` may target: opponents when `hostile`,
    /// otherwise its own side (itself included).
    pub fn valid_targets(&self, actor: CombatantId, hostile: bool) -> Vec<CombatantId> {
        let side = if hostile {
            actor.side.opposite()
        } else {
            actor.side
        };
        self.roster(side)
            .alive_indices()
            .map(|index| CombatantId { side, index })
            .collect()
    }

    /// Take all events produced since the previous call.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            version: SUMMARY_VERSION,
            phase: self.phase,
            round: self.round,
            ended: self.is_ended(),
            victory: self.outcome.is_some_and(BattleOutcome::is_victory),
            experience_reward: self.rewards.experience,
            currency_reward: self.rewards.currency,
            ally_count: self.allies.len(),
            enemy_count: self.enemies.len(),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Ally => &self.allies,
            Side::Enemy => &self.enemies,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Ally => &mut self.allies,
            Side::Enemy => &mut self.enemies,
        }
    }

    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster_mut(id.side).get_mut(id.index)
    }

    /// Every combatant handle, allies first, in roster order.
    fn all_ids(&self) -> Vec<CombatantId> {
        (0..self.allies.len())
            .map(CombatantId::ally)
            .chain((0..self.enemies.len()).map(CombatantId::enemy))
            .collect()
    }

    fn enter_phase(&mut self, phase: BattlePhase) {
        tracing::trace!(from = %self.phase, to = %phase, "phase change");
        self.phase = phase;
        self.turn_timer = 0.0;
    }

    fn emit(&mut self, event: BattleEvent) {
        if let BattleEvent::Message(text) = &event {
            tracing::debug!(target: "battle::narration", "{text}");
        }
        self.events.push(event);
    }

    /// Derive the seed for one roll and bump the roll counter.
    fn next_seed(&mut self, actor: CombatantId, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, actor.rng_key(), context);
        self.nonce += 1;
        seed
    }

    fn roll(&mut self, actor: CombatantId, context: RollContext, min: u32, max: u32) -> u32 {
        let seed = self.next_seed(actor, context);
        self.rng.range(seed, min, max)
    }
}

/// Place a roster on a vertical line at `x`.
fn lay_out_line(roster: &mut Roster, x: f32) {
    for (slot, combatant) in roster.iter_mut().enumerate() {
        combatant.position = Position::new(
            x,
            BattleConfig::LINE_START_Y + slot as f32 * BattleConfig::LINE_SPACING_Y,
        );
    }
}
