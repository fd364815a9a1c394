use battle_core::{
    ActionRequest, BattleConfig, BattleEngine, BattleEvent, BattleOutcome, BattlePhase, Combatant,
    CombatantId, PcgRng, Power, PowerCatalogue, RngOracle, StatKind, StrategyConfig,
};

const DT: f32 = 0.1;

/// Oracle that always returns the same raw value.
struct FixedRng(u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Tick until the battle waits for player input or stops running.
fn run_to_player_turn<R: RngOracle>(engine: &mut BattleEngine<R>, max_ticks: usize) -> bool {
    for _ in 0..max_ticks {
        engine.update(DT);
        if engine.phase() == BattlePhase::PlayerTurn {
            return true;
        }
        if !engine.is_active() {
            return false;
        }
    }
    false
}

fn first_living_enemy<R: RngOracle>(engine: &BattleEngine<R>, actor: CombatantId) -> CombatantId {
    engine.valid_targets(actor, true)[0]
}

fn scenario_engine(seed: u64) -> (BattleEngine, CombatantId, CombatantId) {
    let config = BattleConfig::new().with_flee(false).with_max_rounds(50);
    let mut engine = BattleEngine::new(config, seed);

    let hero = engine
        .add_ally(
            Combatant::player("Luffy")
                .with_base(StatKind::Attack, 18)
                .with_base(StatKind::Level, 2),
        )
        .unwrap();
    let pirate = engine
        .add_enemy(
            Combatant::enemy("Buggy Pirate")
                .with_base(StatKind::Defense, 4)
                .with_base(StatKind::MaxHealth, 60)
                .with_base(StatKind::Health, 60)
                .with_bounty(1_000),
        )
        .unwrap();
    (engine, hero, pirate)
}

/// Player attacks the first living enemy on every turn until the battle ends.
fn play_out<R: RngOracle>(engine: &mut BattleEngine<R>, hero: CombatantId) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    while run_to_player_turn(engine, 10_000) {
        let target = first_living_enemy(engine, hero);
        engine
            .queue_action(ActionRequest::attack(hero, target))
            .expect("player turn accepts an attack");
        events.extend(engine.drain_events());
    }
    events.extend(engine.drain_events());
    events
}

#[test]
fn scenario_victory_pays_a_tenth_of_the_bounty() {
    let (mut engine, hero, pirate) = scenario_engine(2024);
    engine.start_battle().expect("both rosters populated");

    let events = play_out(&mut engine, hero);

    assert_eq!(engine.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(engine.phase(), BattlePhase::Victory);
    assert!(engine.round() <= 50);
    assert_eq!(engine.rewards().currency, 100);
    assert_eq!(engine.rewards().experience, 20);
    assert!(!engine.combatant(pirate).unwrap().is_alive());

    // Takedown (level 1 × 25) plus the whole reward share (20).
    assert_eq!(engine.combatant(hero).unwrap().stats.experience(), 45);

    assert_eq!(events.first(), Some(&BattleEvent::message("Battle begins!")));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded { victory: true })
    );
    assert!(events.iter().all(|event| match event {
        BattleEvent::DamageDealt { amount, .. } => *amount >= 1,
        _ => true,
    }));

    let summary = engine.summary();
    assert!(summary.ended);
    assert!(summary.victory);
    assert_eq!(summary.currency_reward, 100);
    assert_eq!(summary.ally_count, 1);
    assert_eq!(summary.enemy_count, 1);
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let (mut engine, hero, _) = scenario_engine(seed);
        engine.start_battle().unwrap();
        let events = play_out(&mut engine, hero);
        (events, engine.round())
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn minimum_variance_still_deals_at_least_one() {
    let mut engine = BattleEngine::with_rng(BattleConfig::new(), FixedRng(0), 0);
    let hero = engine.add_ally(Combatant::player("Usopp")).unwrap();
    let wall = engine
        .add_enemy(Combatant::enemy("Wall").with_base(StatKind::Defense, 200))
        .unwrap();
    engine.start_battle().unwrap();

    assert!(run_to_player_turn(&mut engine, 100));
    engine.queue_action(ActionRequest::attack(hero, wall)).unwrap();
    engine.drain_events();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(events.contains(&BattleEvent::DamageDealt {
        target: wall,
        amount: 1
    }));
    assert_eq!(engine.combatant(wall).unwrap().stats.current_health(), 99);
}

#[test]
fn power_on_cooldown_deals_no_damage() {
    let mut engine = BattleEngine::new(BattleConfig::new(), 5);
    let ace = engine
        .add_ally(
            Combatant::player("Ace")
                .with_base(StatKind::Power, 50)
                .with_powers(
                    PowerCatalogue::new("Mera Mera no Mi", "")
                        .with_power(Power::new("Fire Fist", 15, 35, 100.0)),
                ),
        )
        .unwrap();
    let dummy = engine
        .add_enemy(
            Combatant::enemy("Dummy")
                .with_base(StatKind::MaxHealth, 1_000)
                .with_base(StatKind::Health, 1_000),
        )
        .unwrap();
    engine.start_battle().unwrap();

    // First use lands: 35 + floor(10 / 4) - floor(5 / 2) = 35.
    assert!(run_to_player_turn(&mut engine, 100));
    engine
        .queue_action(ActionRequest::use_power(ace, "Fire Fist").with_target(dummy))
        .unwrap();
    engine.drain_events();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(events.contains(&BattleEvent::PowerUsed {
        actor: ace,
        power: "Fire Fist".into()
    }));
    assert!(events.contains(&BattleEvent::DamageDealt {
        target: dummy,
        amount: 35
    }));
    let health_after_first = engine.combatant(dummy).unwrap().stats.current_health();
    assert_eq!(health_after_first, 965);

    // Second use in the next round is still cooling down.
    engine
        .queue_action(ActionRequest::use_power(ace, "Fire Fist").with_target(dummy))
        .unwrap();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(!events
        .iter()
        .any(|event| matches!(event, BattleEvent::PowerUsed { .. })));
    assert!(!events.iter().any(|event| matches!(
        event,
        BattleEvent::DamageDealt { target, .. } if *target == dummy
    )));
    assert_eq!(
        engine.combatant(dummy).unwrap().stats.current_health(),
        health_after_first
    );

    let catalogue = engine.combatant(ace).unwrap().powers.as_ref().unwrap();
    let fist = catalogue.power("Fire Fist").unwrap();
    assert!(fist.current_cooldown > 0.0 && fist.current_cooldown < fist.cooldown);
    assert_eq!(catalogue.mastery_points(), 1);
}

#[test]
fn fleeing_ends_in_defeat_right_after_resolution() {
    let mut engine = BattleEngine::new(BattleConfig::new().with_flee(true), 11);
    let hero = engine.add_ally(Combatant::player("Nami")).unwrap();
    engine.add_enemy(Combatant::enemy("Arlong")).unwrap();
    engine.start_battle().unwrap();

    assert!(run_to_player_turn(&mut engine, 100));
    engine.queue_action(ActionRequest::flee(hero)).unwrap();
    assert!(!run_to_player_turn(&mut engine, 100));

    assert_eq!(engine.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(engine.round(), 1);
    assert_eq!(engine.rewards().currency, 0);

    let events = engine.drain_events();
    assert!(events.contains(&BattleEvent::message("Nami fled from battle!")));
    assert_eq!(
        events.last(),
        Some(&BattleEvent::BattleEnded { victory: false })
    );

    // Updates after the end are no-ops.
    engine.update(DT);
    assert!(engine.drain_events().is_empty());
    assert_eq!(engine.phase(), BattlePhase::Defeat);
}

#[test]
fn fleeing_when_forbidden_only_narrates() {
    let mut engine = BattleEngine::new(BattleConfig::new().with_flee(false), 11);
    let hero = engine.add_ally(Combatant::player("Nami")).unwrap();
    engine.add_enemy(Combatant::enemy("Arlong")).unwrap();
    engine.start_battle().unwrap();

    assert!(run_to_player_turn(&mut engine, 100));
    engine.queue_action(ActionRequest::flee(hero)).unwrap();
    assert!(run_to_player_turn(&mut engine, 100));

    assert!(engine.is_active());
    assert!(engine
        .drain_events()
        .contains(&BattleEvent::message("Nami couldn't escape!")));
}

#[test]
fn idle_player_turn_is_forfeited_after_timeout() {
    let config = BattleConfig::new().with_turn_timeout(1.0);
    let mut engine = BattleEngine::new(config, 3);
    let hero = engine.add_ally(Combatant::player("Luffy")).unwrap();
    engine.add_enemy(Combatant::enemy("Alvida")).unwrap();
    engine.start_battle().unwrap();

    assert!(run_to_player_turn(&mut engine, 100));
    engine.update(0.5);
    assert_eq!(engine.phase(), BattlePhase::PlayerTurn);
    engine.update(0.5);
    assert_ne!(engine.phase(), BattlePhase::PlayerTurn);

    let entry = engine
        .turn_order()
        .iter()
        .find(|entry| entry.id == hero)
        .unwrap();
    assert!(entry.has_acted);
    assert!(engine.queue_action(ActionRequest::defend(hero)).is_err());
}

#[test]
fn crew_autopilot_approaches_then_fights() {
    let config = BattleConfig::new().with_crew_autopilot(true);
    let mut engine = BattleEngine::new(config, 17);
    let sanji = engine
        .add_ally(
            Combatant::crew("Sanji")
                .with_base(StatKind::Attack, 40)
                .with_strategy(StrategyConfig::brawler()),
        )
        .unwrap();
    let target = engine
        .add_enemy(
            Combatant::enemy("Kuro")
                .with_base(StatKind::MaxHealth, 60)
                .with_base(StatKind::Health, 60),
        )
        .unwrap();
    engine.start_battle().unwrap();

    // Crew needs no input, so the battle runs to completion on ticks alone.
    let mut ticks = 0;
    let mut approached = false;
    while engine.is_active() && ticks < 20_000 {
        engine.update(DT);
        let x = engine.combatant(sanji).unwrap().position.x;
        approached |= x > BattleConfig::ALLY_LINE_X;
        ticks += 1;
    }

    assert!(approached);
    assert_eq!(engine.outcome(), Some(BattleOutcome::Victory));
    assert!(!engine.combatant(target).unwrap().is_alive());
}

#[test]
fn crew_without_autopilot_waits_for_input() {
    let mut engine = BattleEngine::new(BattleConfig::new(), 17);
    let zoro = engine
        .add_ally(Combatant::crew("Zoro").with_strategy(StrategyConfig::swordsman()))
        .unwrap();
    engine.add_enemy(Combatant::enemy("Mihawk")).unwrap();
    engine.start_battle().unwrap();

    let mut reached = false;
    for _ in 0..100 {
        engine.update(DT);
        if engine.phase() == BattlePhase::CrewTurn {
            reached = true;
            break;
        }
    }
    assert!(reached);
    assert_eq!(engine.current_actor(), Some(zoro));

    engine.update(DT);
    assert_eq!(engine.phase(), BattlePhase::CrewTurn);
    assert_eq!(
        engine.combatant(zoro).unwrap().position.x,
        BattleConfig::ALLY_LINE_X
    );
}

fn message_index(events: &[BattleEvent], prefix: &str) -> usize {
    events
        .iter()
        .position(|event| matches!(event, BattleEvent::Message(text) if text.starts_with(prefix)))
        .unwrap_or_else(|| panic!("no message starting with {prefix:?}"))
}

/// Sturdy hero against a faster enemy that always queues first.
fn duel_engine<R: RngOracle>(rng: R) -> (BattleEngine<R>, CombatantId, CombatantId) {
    let mut engine = BattleEngine::with_rng(BattleConfig::new().with_flee(false), rng, 21);
    let hero = engine
        .add_ally(
            Combatant::player("Luffy")
                .with_base(StatKind::MaxHealth, 1_000)
                .with_base(StatKind::Health, 1_000),
        )
        .unwrap();
    let rival = engine
        .add_enemy(
            Combatant::enemy("Alvida")
                .with_base(StatKind::Attack, 40)
                .with_base(StatKind::Speed, 100)
                .with_base(StatKind::MaxHealth, 1_000)
                .with_base(StatKind::Health, 1_000),
        )
        .unwrap();
    engine.start_battle().unwrap();
    (engine, hero, rival)
}

#[test]
fn higher_priority_resolves_before_earlier_submissions() {
    let (mut engine, hero, rival) = duel_engine(PcgRng);

    assert!(run_to_player_turn(&mut engine, 100));
    assert!(engine.turn_order()[0].has_acted);
    assert_eq!(engine.turn_order()[0].id, rival);
    engine
        .queue_action(ActionRequest::attack(hero, rival).with_priority(10))
        .unwrap();
    engine.drain_events();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(message_index(&events, "Luffy attacks") < message_index(&events, "Alvida attacks"));
}

#[test]
fn equal_priority_keeps_submission_order() {
    let (mut engine, hero, rival) = duel_engine(PcgRng);

    assert!(run_to_player_turn(&mut engine, 100));
    engine
        .queue_action(ActionRequest::attack(hero, rival).with_priority(5))
        .unwrap();
    engine.drain_events();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(message_index(&events, "Alvida attacks") < message_index(&events, "Luffy attacks"));
}

#[test]
fn defend_raises_defense_for_later_hits() {
    // Minimum variance: every Alvida hit is 40 × 80% = 32 before mitigation.
    let (mut engine, hero, rival) = duel_engine(FixedRng(0));

    assert!(run_to_player_turn(&mut engine, 100));
    engine.queue_action(ActionRequest::defend(hero)).unwrap();
    engine.drain_events();
    assert!(run_to_player_turn(&mut engine, 100));

    let events = engine.drain_events();
    assert!(events.contains(&BattleEvent::message("Luffy takes a defensive stance!")));
    // The enemy's priority-5 attack landed before the stance.
    assert!(events.contains(&BattleEvent::DamageDealt {
        target: hero,
        amount: 30
    }));
    let luffy = engine.combatant(hero).unwrap();
    assert_eq!(
        luffy.stats.final_value(StatKind::Defense),
        5 + BattleConfig::DEFAULT_DEFEND_BONUS
    );

    engine.queue_action(ActionRequest::attack(hero, rival)).unwrap();
    assert!(run_to_player_turn(&mut engine, 100));
    assert!(engine.drain_events().contains(&BattleEvent::DamageDealt {
        target: hero,
        amount: 27
    }));
}

#[test]
fn enemy_takedown_grants_no_experience() {
    let config = BattleConfig::new().with_turn_timeout(0.3);
    let mut engine = BattleEngine::new(config, 8);
    let hero = engine
        .add_ally(
            Combatant::player("Luffy")
                .with_base(StatKind::Level, 4)
                .with_base(StatKind::Health, 5),
        )
        .unwrap();
    let grunt = engine
        .add_enemy(
            Combatant::enemy("Grunt")
                .with_base(StatKind::Attack, 50)
                .with_base(StatKind::Health, 40),
        )
        .unwrap();
    engine.start_battle().unwrap();

    // The hero never queues; its turn times out and the grunt's hit lands.
    for _ in 0..1_000 {
        if !engine.is_active() {
            break;
        }
        engine.update(DT);
    }

    assert_eq!(engine.outcome(), Some(BattleOutcome::Defeat));
    assert!(!engine.combatant(hero).unwrap().is_alive());
    let grunt = engine.combatant(grunt).unwrap();
    assert_eq!(grunt.level(), 1);
    assert_eq!(grunt.stats.experience(), 0);
    assert_eq!(grunt.stats.current_health(), 40);
    assert!(!engine
        .drain_events()
        .iter()
        .any(|event| matches!(event, BattleEvent::LevelUp { .. })));
}
