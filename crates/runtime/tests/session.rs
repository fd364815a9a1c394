use std::time::Duration;

use battle_core::{
    ActionRequest, BattleConfig, BattleEvent, BattlePhase, Combatant, CombatantId, Roster,
    SetupError, StatKind,
};
use battle_runtime::{
    BattleSession, ProviderKind, RuntimeConfig, RuntimeError, ScriptedActionProvider,
    StrategyActionProvider, Topic, WaitActionProvider,
};

fn runtime(seed: u64) -> RuntimeConfig {
    RuntimeConfig::default()
        .with_seed(seed)
        .with_tick(Duration::from_millis(100))
        .with_max_ticks(50_000)
}

fn crew() -> Roster {
    Roster::new()
        .with(
            Combatant::player("Luffy")
                .with_base(StatKind::Attack, 30)
                .with_base(StatKind::Level, 3),
        )
        .with(Combatant::crew("Zoro").with_base(StatKind::Attack, 25))
}

fn pirates() -> Roster {
    Roster::new()
        .with(Combatant::enemy("Buggy Pirate").with_base(StatKind::MaxHealth, 40))
        .with(Combatant::enemy("Buggy Pirate").with_base(StatKind::MaxHealth, 40))
}

#[test]
fn autopiloted_session_runs_to_victory() {
    let mut session = BattleSession::new(BattleConfig::new().with_flee(false), runtime(77))
        .with_player_provider(StrategyActionProvider::new(1))
        .with_crew_provider(StrategyActionProvider::new(2));
    let mut progress = session.subscribe(Topic::Progress);

    session.start(crew(), pirates()).unwrap();
    let summary = session.run().unwrap();

    assert!(summary.ended);
    assert!(summary.victory);
    assert_eq!(summary.phase, BattlePhase::Victory);

    let mut ended = None;
    while let Ok(event) = progress.try_recv() {
        if let BattleEvent::BattleEnded { victory } = event.event {
            ended = Some(victory);
        }
    }
    assert_eq!(ended, Some(true));

    let report = session.finish();
    assert_eq!(report.allies.len(), 2);
    assert!(report.allies.get(0).unwrap().stats.experience() > 0);
}

#[test]
fn same_seed_gives_the_same_battle() {
    let play = |seed| {
        let mut session = BattleSession::new(BattleConfig::new(), runtime(seed))
            .with_player_provider(StrategyActionProvider::new(seed))
            .with_crew_provider(StrategyActionProvider::new(seed + 1));
        let mut combat = session.subscribe(Topic::Combat);
        session.start(crew(), pirates()).unwrap();
        let summary = session.run().unwrap();

        let mut hits = Vec::new();
        while let Ok(event) = combat.try_recv() {
            hits.push(event);
        }
        (summary, hits, session.ticks())
    };

    assert_eq!(play(5), play(5));
}

#[test]
fn player_turn_without_provider_is_an_error() {
    let mut session = BattleSession::new(BattleConfig::new(), runtime(3));
    session
        .start(
            Roster::new().with(Combatant::player("Luffy")),
            Roster::new().with(Combatant::enemy("Alvida")),
        )
        .unwrap();

    let error = session.run().unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::ProviderNotSet {
            kind: ProviderKind::Player
        }
    ));
}

#[test]
fn run_before_start_is_rejected() {
    let mut session = BattleSession::new(BattleConfig::new(), runtime(3));
    assert!(matches!(
        session.run(),
        Err(RuntimeError::NotStarted {
            phase: BattlePhase::Setup
        })
    ));
}

#[test]
fn setup_failures_are_wrapped() {
    let mut session = BattleSession::new(BattleConfig::new(), runtime(3));
    let error = session
        .start(Roster::new().with(Combatant::player("Luffy")), Roster::new())
        .unwrap_err();
    assert!(matches!(error, RuntimeError::Setup(SetupError::NoEnemies)));
}

#[test]
fn scripted_flee_ends_the_session_in_defeat() {
    let hero = CombatantId::ally(0);
    let mut session = BattleSession::new(BattleConfig::new().with_flee(true), runtime(11))
        .with_player_provider(ScriptedActionProvider::new().with(ActionRequest::flee(hero)));
    session
        .start(
            Roster::new().with(Combatant::player("Nami")),
            Roster::new().with(Combatant::enemy("Arlong")),
        )
        .unwrap();

    let summary = session.run().unwrap();
    assert!(summary.ended);
    assert!(!summary.victory);
    assert_eq!(summary.round, 1);
}

#[test]
fn rejected_scripted_action_forfeits_the_turn() {
    let hero = CombatantId::ally(0);
    let config = BattleConfig::new()
        .with_turn_timeout(0.3)
        .with_max_rounds(1);
    let mut session = BattleSession::new(config, runtime(11)).with_player_provider(
        ScriptedActionProvider::new().with(ActionRequest::attack(hero, CombatantId::enemy(4))),
    );
    session
        .start(
            Roster::new().with(Combatant::player("Luffy")),
            Roster::new().with(Combatant::enemy("Kuro")),
        )
        .unwrap();

    let summary = session.run().unwrap();
    assert!(summary.ended);
    assert!(!summary.victory);
    assert_eq!(summary.round, 1);

    let kuro = session.engine().combatant(CombatantId::enemy(0)).unwrap();
    assert_eq!(kuro.stats.current_health(), 100);
}

#[test]
fn idle_provider_loses_on_the_round_limit() {
    let config = BattleConfig::new()
        .with_turn_timeout(0.3)
        .with_max_rounds(3);
    let mut session =
        BattleSession::new(config, runtime(8)).with_player_provider(WaitActionProvider);
    session
        .start(
            Roster::new().with(
                Combatant::player("Usopp")
                    .with_base(StatKind::MaxHealth, 5_000)
                    .with_base(StatKind::Health, 5_000),
            ),
            Roster::new().with(Combatant::enemy("Kaya's Butler").with_base(StatKind::Attack, 1)),
        )
        .unwrap();

    let summary = session.run().unwrap();
    assert!(!summary.victory);
    assert_eq!(summary.round, 3);
}

#[test]
fn tick_budget_is_enforced() {
    let mut session = BattleSession::new(
        BattleConfig::new(),
        runtime(8).with_max_ticks(3),
    )
    .with_player_provider(WaitActionProvider);
    session
        .start(
            Roster::new().with(Combatant::player("Luffy")),
            Roster::new().with(Combatant::enemy("Kuro")),
        )
        .unwrap();

    assert!(matches!(
        session.run(),
        Err(RuntimeError::TickLimit { ticks: 3 })
    ));
}
