//! Sample round files parse, validate and settle.

use std::path::Path;

use fairway_core::config::EngineConfig;
use fairway_core::game_registry::GameKind;
use fairway_core::money::Cents;
use fairway_engine::game::GameResult;
use fairway_engine::input::{InputError, InputFormat, RoundInput};
use fairway_engine::{RoundSnapshot, evaluate};

const FOUR_BALL: &str = include_str!("../../../demos/round.toml");
const HEAD_TO_HEAD: &str = include_str!("../../../demos/nassau.json");

fn load(content: &str, format: InputFormat) -> RoundSnapshot {
    RoundInput::parse(content, format)
        .unwrap()
        .into_snapshot(&EngineConfig::default())
        .unwrap()
}

#[test]
fn four_ball_demo_settles_to_zero() {
    let snapshot = load(FOUR_BALL, InputFormat::Toml);
    assert_eq!(snapshot.players.len(), 4);
    assert_eq!(snapshot.holes.len(), 18);

    let report = evaluate(&snapshot);
    assert_eq!(report.thru, Some(6));
    let kinds: Vec<GameKind> = report.results.iter().map(GameResult::kind).collect();
    assert_eq!(
        kinds,
        vec![GameKind::Skins, GameKind::Stableford, GameKind::BestBall, GameKind::Wolf]
    );
    assert_eq!(report.balances.values().copied().sum::<Cents>(), Cents::ZERO);
    // The longest drive bet is still undecided.
    assert!(report.ledger.entries().iter().all(|e| e.kind != GameKind::SideBet || e.to == 3));
}

#[test]
fn head_to_head_demo_settles_to_zero() {
    let snapshot = load(HEAD_TO_HEAD, InputFormat::Json);
    let report = evaluate(&snapshot);
    // Hole 10 is only half scored.
    assert_eq!(report.thru, Some(9));
    let GameResult::Nassau(nassau) = &report.results[0] else {
        panic!("expected a nassau result");
    };
    assert_eq!(nassau.holes_played, 9);
    assert!(!nassau.presses.is_empty());
    assert_eq!(report.balances.values().copied().sum::<Cents>(), Cents::ZERO);
}

#[test]
fn format_follows_the_extension() {
    assert_eq!(InputFormat::from_path(Path::new("round.TOML")), Ok(InputFormat::Toml));
    assert_eq!(InputFormat::from_path(Path::new("a/b.json")), Ok(InputFormat::Json));
    assert_eq!(
        InputFormat::from_path(Path::new("round.yaml")),
        Err(InputError::UnsupportedFormat("yaml".to_string()))
    );
}

#[test]
fn malformed_files_are_rejected() {
    assert!(matches!(
        RoundInput::parse("{ \"players\": 7 }", InputFormat::Json),
        Err(InputError::Json(_))
    ));
    assert!(matches!(
        RoundInput::parse("[[players]\nid = 1", InputFormat::Toml),
        Err(InputError::Toml(_))
    ));
    let solo = RoundInput::parse("[[players]]\nid = 1\nname = \"Ana\"\n", InputFormat::Toml)
        .unwrap()
        .into_snapshot(&EngineConfig::default());
    assert_eq!(solo, Err(InputError::PlayerCount(1)));
}

#[test]
fn unknown_game_type_is_a_parse_error() {
    let json = r#"{
        "players": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Bo"}],
        "games": [{"type": "bingo_bango_bongo"}]
    }"#;
    assert!(matches!(RoundInput::from_json(json), Err(InputError::Json(_))));
}
