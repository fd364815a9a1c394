//! Single-threaded host loop around a [`BattleEngine`].

use battle_core::{
    BattleConfig, BattleEngine, BattlePhase, BattleSummary, CombatantId, Roster,
};

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};

/// Drives one battle at a fixed tick.
///
/// Each [`step`](Self::step) asks the matching provider for input when the
/// engine waits on a player or crew turn, advances the engine by one tick and
/// republishes the drained events on the [`EventBus`]. Actions the engine
/// rejects are logged and dropped.
pub struct BattleSession {
    engine: BattleEngine,
    config: RuntimeConfig,
    seed: u64,
    bus: EventBus,
    player_provider: Option<Box<dyn ActionProvider>>,
    crew_provider: Option<Box<dyn ActionProvider>>,
    ticks: u64,
}

/// Result of a finished session.
#[derive(Debug)]
pub struct SessionReport {
    pub summary: BattleSummary,
    pub allies: Roster,
    pub enemies: Roster,
    pub ticks: u64,
}

impl BattleSession {
    pub fn new(battle_config: BattleConfig, config: RuntimeConfig) -> Self {
        let seed = config.resolve_seed();
        tracing::info!(seed, tick_ms = config.tick.as_millis() as u64, "battle session created");
        Self {
            engine: BattleEngine::new(battle_config, seed),
            bus: EventBus::with_capacity(config.event_capacity),
            config,
            seed,
            player_provider: None,
            crew_provider: None,
            ticks: 0,
        }
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the crew action provider
    pub fn set_crew_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.crew_provider = Some(Box::new(provider));
    }

    pub fn with_player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.set_player_provider(provider);
        self
    }

    pub fn with_crew_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.set_crew_provider(provider);
        self
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Hand both rosters to the engine and start the battle.
    pub fn start(&mut self, allies: Roster, enemies: Roster) -> Result<()> {
        self.engine.set_rosters(allies, enemies)?;
        self.engine.start_battle()?;
        self.publish_events();
        Ok(())
    }

    /// Combatant whose turn is waiting on a provider, if any.
    pub fn awaiting_input(&self) -> Option<CombatantId> {
        if !matches!(
            self.engine.phase(),
            BattlePhase::PlayerTurn | BattlePhase::CrewTurn
        ) {
            return None;
        }
        let actor = self.engine.current_actor()?;
        let pending = self
            .engine
            .turn_order()
            .iter()
            .any(|entry| entry.id == actor && !entry.has_acted);
        pending.then_some(actor)
    }

    /// Run one tick. Returns whether the battle is still running.
    pub fn step(&mut self) -> Result<bool> {
        if !self.engine.is_active() {
            return Ok(false);
        }

        if let Some(actor) = self.awaiting_input() {
            let kind = match self.engine.phase() {
                BattlePhase::PlayerTurn => ProviderKind::Player,
                _ => ProviderKind::Crew,
            };
            let provider = match kind {
                ProviderKind::Player => self.player_provider.as_mut(),
                ProviderKind::Crew => self.crew_provider.as_mut(),
            }
            .ok_or(RuntimeError::ProviderNotSet { kind })?;

            if let Some(request) = provider.provide_action(actor, &self.engine)? {
                let action = request.kind.clone();
                match self.engine.queue_action(request) {
                    Ok(()) => tracing::debug!(%actor, %action, "provider queued action"),
                    // The turn stays open until the provider retries or it times out.
                    Err(error) => {
                        tracing::warn!(%actor, %action, %error, "provider action rejected")
                    }
                }
            }
        }

        self.engine.update(self.config.tick_seconds());
        self.ticks += 1;
        self.publish_events();
        Ok(self.engine.is_active())
    }

    /// Step until the battle ends or the tick budget runs out.
    pub fn run(&mut self) -> Result<BattleSummary> {
        if !self.engine.is_active() && !self.engine.is_ended() {
            return Err(RuntimeError::NotStarted {
                phase: self.engine.phase(),
            });
        }

        while self.step()? {
            if self.ticks >= self.config.max_ticks {
                tracing::warn!(ticks = self.ticks, "tick budget exhausted");
                return Err(RuntimeError::TickLimit { ticks: self.ticks });
            }
        }

        let summary = self.engine.summary();
        tracing::info!(
            round = summary.round,
            victory = summary.victory,
            ticks = self.ticks,
            "battle finished"
        );
        Ok(summary)
    }

    /// Release the rosters together with the final summary.
    pub fn finish(mut self) -> SessionReport {
        let summary = self.engine.summary();
        let (allies, enemies) = self.engine.clear();
        SessionReport {
            summary,
            allies,
            enemies,
            ticks: self.ticks,
        }
    }

    fn publish_events(&mut self) {
        let round = self.engine.round();
        for event in self.engine.drain_events() {
            self.bus.publish(Event { round, event });
        }
    }
}
