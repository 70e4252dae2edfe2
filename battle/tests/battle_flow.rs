use tera_battle::calc::{
    resolve, resolve_order, AttackerSnapshot, DefenderSnapshot, FieldSnapshot, MoveSnapshot,
    SpeedSnapshot,
};
use tera_battle::query::{MoveTable, Session, SpeciesTable, UsageTable};
use tera_battle::tracking::build_roster;
use tera_battle::{
    BattleConfig, BattleState, BattleUpdate, Fact, KnockoutClass, Side, Stat, StatBlock,
    StatStages, Status, TurnOrder, Type, Weather,
};
use tera_protocol::{MoveCategory, MoveData};
use tera_team::parse_team;

const TEAM: &str = "\
Dragonite @ Choice Band
Ability: Multiscale
Tera Type: Normal
EVs: 252 Atk / 4 SpD / 252 Spe
Adamant Nature
- Extreme Speed
- Dragon Claw

Gholdengo @ Choice Specs
Ability: Good as Gold
Tera Type: Steel
EVs: 252 HP / 252 SpA / 4 Spe
Modest Nature
- Make It Rain
- Shadow Ball
";

const SPECIES: &str = r#"{
    "Dragonite": {
        "base_stats": {"hp": 91, "atk": 134, "def": 95, "spa": 100, "spd": 100, "spe": 80},
        "types": ["Dragon", "Flying"]
    },
    "Gholdengo": {
        "base_stats": {"hp": 87, "atk": 60, "def": 95, "spa": 133, "spd": 91, "spe": 84},
        "types": ["Steel", "Ghost"]
    },
    "Flutter Mane": {
        "base_stats": {"hp": 55, "atk": 55, "def": 55, "spa": 135, "spd": 135, "spe": 135},
        "types": ["Ghost", "Fairy"]
    }
}"#;

const USAGE: &str = r#"{
    "Flutter Mane": {
        "moves": ["Moonblast", "Shadow Ball", "Protect"],
        "items": ["Booster Energy", "Choice Specs"],
        "abilities": ["Protosynthesis"],
        "tera_types": ["Fairy", "Stellar"],
        "spreads": ["Timid:4/0/0/252/0/252"]
    }
}"#;

const MOVES: &str = r#"{
    "Dragon Claw": {"name": "Dragon Claw", "type": "Dragon", "category": "Physical", "power": 80},
    "Extreme Speed": {"name": "Extreme Speed", "type": "Normal", "category": "Physical", "power": 80, "priority": 2},
    "Make It Rain": {"name": "Make It Rain", "type": "Steel", "category": "Special", "power": 120},
    "Shadow Ball": {"name": "Shadow Ball", "type": "Ghost", "category": "Special", "power": 80},
    "Moonblast": {"name": "Moonblast", "type": "Fairy", "category": "Special", "power": 95},
    "Protect": {"name": "Protect", "type": "Normal", "category": "Status", "power": 0, "priority": 4}
}"#;

fn speed(spe: u32) -> SpeedSnapshot {
    SpeedSnapshot {
        spe,
        stage: 0,
        item: None,
        ability: None,
        status: None,
        item_consumed: false,
        hp_percent: 100.0,
    }
}

fn tackle() -> MoveSnapshot {
    MoveSnapshot::from_data(&MoveData {
        name: "Tackle".into(),
        move_type: "Normal".into(),
        category: MoveCategory::Physical,
        power: 40,
        priority: 0,
        accuracy: Some(100),
    })
}

#[test]
fn golden_damage_case() {
    let attacker = AttackerSnapshot {
        stats: StatBlock::new(150, 140, 100, 100, 100, 100),
        boosts: StatStages::new(),
        status: None,
        item: None,
        types: vec![Type::Dragon],
        tera_type: None,
        terastallized: false,
    };
    let defender = DefenderSnapshot {
        stats: StatBlock::new(200, 100, 100, 100, 100, 100),
        boosts: StatStages::new(),
        types: vec![Type::Water],
        reflect: false,
        light_screen: false,
    };
    let mv = MoveSnapshot {
        name: "Dragon Hammer".into(),
        move_type: Type::Dragon,
        category: MoveCategory::Physical,
        power: 100,
        priority: 0,
        critical: false,
    };

    let result = resolve(&attacker, &defender, &mv, &FieldSnapshot::default());
    assert_eq!((result.min, result.max), (79, 94));
    assert_eq!((result.min_percent, result.max_percent), (39.5, 47.0));
    assert_eq!(result.knockout, KnockoutClass::TwoPlusHits);
    assert_eq!(result.knockout.to_string(), "2+ hits, not guaranteed");
}

#[test]
fn trick_room_lets_the_slower_side_move_first() {
    let field = FieldSnapshot {
        trick_room: true,
        ..FieldSnapshot::default()
    };
    let result = resolve_order(&speed(150), &speed(100), &field, &tackle(), Some(&tackle()));
    assert_eq!(result.order, TurnOrder::OpponentFirst);
}

#[test]
fn exact_speed_tie_is_undetermined() {
    let result = resolve_order(
        &speed(100),
        &speed(100),
        &FieldSnapshot::default(),
        &tackle(),
        Some(&tackle()),
    );
    assert_eq!(result.order, TurnOrder::SpeedTie);
}

#[test]
fn switching_keeps_persistent_state() {
    let mut battle = BattleState::new(BattleConfig::default(), &[]);
    battle.set_active(Side::Opponent, "Amoonguss");
    battle.apply_update(&BattleUpdate {
        opp_hp_change_input: Some(-45.0),
        opp_status_change: Some("slp".into()),
        opp_rank_change: Some(tera_protocol::RankChange {
            spd: 1,
            ..Default::default()
        }),
        opp_move_used: Some("Spore".into()),
        opp_item: Some("Rocky Helmet".into()),
        ..Default::default()
    });

    battle.set_active(Side::Opponent, "Incineroar");
    battle.set_active(Side::Opponent, "Amoonguss");

    let amoonguss = battle.opp_active().unwrap();
    assert_eq!(amoonguss.hp_percent, 55.0);
    assert_eq!(amoonguss.status, Some(Status::Sleep));
    assert_eq!(amoonguss.boosts.get(Stat::Spd), 0);
    assert_eq!(amoonguss.known_moves, vec!["Spore"]);
    assert_eq!(amoonguss.item, Fact::Known("Rocky Helmet".to_string()));
    assert_eq!(battle.combatants(Side::Opponent).len(), 2);
}

#[test]
fn malformed_event_fields_do_not_drop_the_event() -> anyhow::Result<()> {
    let mut battle = BattleState::new(BattleConfig::default(), &[]);
    battle.set_active(Side::Opponent, "Amoonguss");

    let update = BattleUpdate::from_json(
        r#"{"opp_hp_change_input": -40, "opp_rank_change": {"atk": 200}, "turn_end": true}"#,
    )?;
    battle.apply_update(&update);
    battle.apply_update(&BattleUpdate::from_json(
        r#"{"opp_hp_change_input": "-10", "opp_switch": "", "opp_item": "", "opp_move_used": ""}"#,
    )?);

    let amoonguss = battle.opp_active().unwrap();
    assert_eq!(amoonguss.name, "Amoonguss");
    assert_eq!(amoonguss.hp_percent, 50.0);
    assert_eq!(amoonguss.boosts.get(Stat::Atk), 6);
    assert_eq!(amoonguss.item, Fact::Unknown);
    assert!(amoonguss.known_moves.is_empty());
    assert_eq!(battle.combatants(Side::Opponent).len(), 1);
    assert_eq!(battle.unrevealed_opponents(), 2);
    assert_eq!(battle.turn, 2);
    Ok(())
}

#[test]
fn full_session_from_json_events() -> anyhow::Result<()> {
    let species = SpeciesTable::from_json(SPECIES)?;
    let usage = UsageTable::from_json(USAGE)?;
    let moves = MoveTable::from_json(MOVES)?;

    let members = parse_team(TEAM)?;
    let config = BattleConfig::default();
    let roster = build_roster(&members, &species, config.level);
    assert_eq!(roster.len(), 2);

    let mut battle = BattleState::new(config, &roster);
    battle.set_opponent_roster(vec!["Flutter Mane".into(), "Kingambit".into()]);
    battle.set_selection(vec!["Dragonite".into(), "Gholdengo".into()]);

    let mut session = Session::new(battle, &moves, &usage, &species);

    let outcome = session.apply(&BattleUpdate::from_json(
        r#"{"opp_switch": "Flutter Mane", "weather": "rain"}"#,
    )?);
    assert_eq!(outcome.revealed, vec!["Flutter Mane"]);
    assert_eq!(session.state().field.weather, Some(Weather::Rain));
    assert_eq!(session.state().unseen_roster(), vec!["Kingambit"]);

    let opp = session.state().opp_active().unwrap();
    assert_eq!(opp.types, vec![Type::Ghost, Type::Fairy]);
    // "Stellar" is not a type the chart knows
    assert_eq!(opp.tera_type.candidates(), &[Type::Fairy]);

    // Neutral Shadow Ball: partial damage, estimated from the computed range
    let outcome = session.apply(&BattleUpdate::from_json(
        r#"{"opp_move_used": "Shadow Ball"}"#,
    )?);
    let estimate = outcome.my_hp_estimate.unwrap();
    assert!(estimate < 0.0 && estimate > -100.0);
    let me = session.state().my_active().unwrap();
    assert!((me.hp_percent - (100.0 + estimate)).abs() < 1e-9);

    // Moonblast is super effective and knocks Dragonite out
    let outcome = session.apply(&BattleUpdate::from_json(
        r#"{"opp_move_used": "Moonblast", "turn_end": true}"#,
    )?);
    assert!(outcome.my_hp_estimate.unwrap() < -100.0);
    let me = session.state().my_active().unwrap();
    assert_eq!(me.hp_percent, 0.0);
    assert!(me.fainted);
    assert_eq!(session.state().turn, 2);
    assert_eq!(
        session.state().opp_active().unwrap().known_moves,
        vec!["Shadow Ball", "Moonblast"]
    );

    let report = session.simulate().unwrap();
    assert_eq!(report.attacker, "Dragonite");
    assert!(report.threats.iter().any(|t| t.name == "Moonblast"));
    // Fairy is immune to Dragon Claw
    let claw = report.attacks.iter().find(|a| a.name == "Dragon Claw").unwrap();
    assert_eq!(claw.damage.max, 0);

    let text = session.state().report().unwrap().to_string();
    assert!(text.contains("[Turn 2]"));
    assert!(text.contains("bench: Gholdengo"));
    Ok(())
}

#[test]
fn scarf_inferred_then_confirmed_item_blocks_it() -> anyhow::Result<()> {
    let species = SpeciesTable::from_json(SPECIES)?;
    let usage = UsageTable::new();
    let moves = MoveTable::new();

    let roster = build_roster(&parse_team(TEAM)?, &species, 50);
    let mut battle = BattleState::new(BattleConfig::default(), &roster);
    battle.set_active(Side::Mine, "Dragonite");

    let mut session = Session::new(battle, &moves, &usage, &species);
    session.set_active(Side::Opponent, "Flutter Mane");

    // Adamant 252 Spe Dragonite: 132, well under Flutter Mane's 187 floor
    assert!(session.infer_opponent_speed(true).fact().is_none());

    // At +2 (264) being outsped means a scarf
    session
        .state_mut()
        .active_mut(Side::Mine)
        .unwrap()
        .set_stage(Stat::Spe, 2);
    assert!(session.infer_opponent_speed(true).fact().is_some());
    assert_eq!(
        session.state().opp_active().unwrap().item,
        Fact::Known("Choice Scarf".to_string())
    );

    // Already known now: nothing more to learn
    assert!(session.infer_opponent_speed(true).fact().is_none());
    Ok(())
}
