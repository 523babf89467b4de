use fairway_core::course::HoleInfo;
use fairway_core::game_trait::PlayerId;
use fairway_core::money::Cents;
use fairway_core::scorecard::Score;
use fairway_core::test_helpers::{make_players, regulation_course, score_rows};

use fairway_engine::RoundSnapshot;
use fairway_engine::game::GameConfig;
use fairway_engine::settlement::SideBet;

pub fn dollars(amount: i64) -> Cents {
    Cents::from_whole_dollars(amount)
}

/// A round on the regulation course with `rows` of gross scores.
pub fn round(player_count: usize, rows: &[(PlayerId, &[u8])]) -> RoundSnapshot {
    let mut snapshot = RoundSnapshot::new(make_players(player_count), regulation_course());
    snapshot.scores = score_rows(rows);
    snapshot
}

/// A round where every row is `gross` repeated over `holes` holes.
pub fn flat_round(player_count: usize, gross: &[u8], holes: usize) -> RoundSnapshot {
    let rows: Vec<(PlayerId, Vec<u8>)> = gross
        .iter()
        .enumerate()
        .map(|(i, &g)| (i as PlayerId + 1, vec![g; holes]))
        .collect();
    let borrowed: Vec<(PlayerId, &[u8])> =
        rows.iter().map(|(id, row)| (*id, row.as_slice())).collect();
    round(player_count, &borrowed)
}

pub fn with_games(mut snapshot: RoundSnapshot, games: Vec<GameConfig>) -> RoundSnapshot {
    snapshot.games = games;
    snapshot
}

pub fn side_bet(label: &str, hole: Option<u8>, stakes: Cents, winner: PlayerId) -> SideBet {
    SideBet {
        label: label.to_string(),
        hole,
        stakes,
        winner: Some(winner),
    }
}

pub fn add_score(snapshot: &mut RoundSnapshot, player_id: PlayerId, hole: u8, strokes: u8) {
    snapshot.scores.push(Score::new(player_id, hole, strokes));
}

pub fn nine_holes() -> Vec<HoleInfo> {
    (1..=9).map(|n| HoleInfo::new(n, 4)).collect()
}
