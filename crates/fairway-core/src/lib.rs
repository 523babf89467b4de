pub mod config;
pub mod context;
pub mod course;
pub mod game_registry;
pub mod game_trait;
pub mod money;
pub mod player;
pub mod round;
pub mod scorecard;
pub mod strokes;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::fmt::Debug;

    use crate::course::HoleInfo;
    use crate::game_trait::{PlayerId, WagerGame};
    use crate::player::Player;
    use crate::round::RoundView;
    use crate::scorecard::Score;
    use crate::strokes::StrokeAllocation;

    /// Pars for a par-72 regulation course, holes 1 through 18.
    pub const REGULATION_PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 3, 4, 5, 4];

    /// Create `n` test players with sequential IDs starting at 1, teeing off in id order.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(i as PlayerId + 1, format!("Player{}", i + 1), i as u8))
            .collect()
    }

    /// The 18-hole regulation course.
    pub fn regulation_course() -> Vec<HoleInfo> {
        REGULATION_PARS
            .iter()
            .enumerate()
            .map(|(i, &par)| HoleInfo::new(i as u8 + 1, par))
            .collect()
    }

    /// A nine-hole course where every hole is a par 4.
    pub fn nine_hole_course() -> Vec<HoleInfo> {
        (1..=9).map(|n| HoleInfo::new(n, 4)).collect()
    }

    /// Gross scores for one player, starting at hole 1.
    pub fn scores_for(player_id: PlayerId, gross: &[u8]) -> Vec<Score> {
        gross
            .iter()
            .enumerate()
            .map(|(i, &strokes)| Score::new(player_id, i as u8 + 1, strokes))
            .collect()
    }

    /// Gross scores for several players, each row starting at hole 1.
    pub fn score_rows(rows: &[(PlayerId, &[u8])]) -> Vec<Score> {
        rows.iter()
            .flat_map(|&(player_id, gross)| scores_for(player_id, gross))
            .collect()
    }

    /// Every player shoots `gross` on each of the first `holes` holes.
    pub fn flat_scores(players: &[Player], holes: u8, gross: u8) -> Vec<Score> {
        players
            .iter()
            .flat_map(|p| (1..=holes).map(move |hole| Score::new(p.id, hole, gross)))
            .collect()
    }

    // ================================================================
    // Calculator Contract Tests
    // ================================================================
    // Generic checks every WagerGame implementation must pass. Game crates
    // call them from their own #[cfg(test)] modules with concrete inputs.

    /// Calculating twice over the same snapshot must give the same outcome.
    pub fn contract_calculation_is_idempotent<G>(
        game: &G,
        players: &[Player],
        scores: &[Score],
        config: &G::Config,
    ) where
        G: WagerGame,
        G::Outcome: PartialEq + Debug,
    {
        let strokes = StrokeAllocation::new();
        let round = RoundView::new(players, scores, &[], &strokes);
        let first = game.calculate(&round, config);
        let second = game.calculate(&round, config);
        assert_eq!(first, second, "calculate() must be a pure function of its inputs");
    }

    /// A hole only one player has scored must not change the outcome.
    pub fn contract_partial_hole_is_ignored<G>(
        game: &G,
        players: &[Player],
        scores: &[Score],
        config: &G::Config,
    ) where
        G: WagerGame,
        G::Outcome: PartialEq + Debug,
    {
        let strokes = StrokeAllocation::new();
        let before = {
            let round = RoundView::new(players, scores, &[], &strokes);
            game.calculate(&round, config)
        };
        let next_hole = scores.iter().map(|s| s.hole).max().unwrap_or(0) + 1;
        let mut with_partial = scores.to_vec();
        with_partial.push(Score::new(players[0].id, next_hole, 1));
        let round = RoundView::new(players, &with_partial, &[], &strokes);
        let after = game.calculate(&round, config);
        assert_eq!(before, after, "a partially scored hole must be skipped, not zero-filled");
    }

    /// Calling with an unsupported player count must not panic.
    pub fn contract_unsupported_player_count_is_not_applicable<G>(
        game: &G,
        player_count: usize,
        config: &G::Config,
    ) -> G::Outcome
    where
        G: WagerGame,
    {
        assert!(
            !game.supports_player_count(player_count),
            "{} should not support {player_count} players",
            game.metadata().name
        );
        let players = make_players(player_count);
        let scores = flat_scores(&players, 18, 4);
        let strokes = StrokeAllocation::new();
        let round = RoundView::new(&players, &scores, &[], &strokes);
        game.calculate(&round, config)
    }
}
