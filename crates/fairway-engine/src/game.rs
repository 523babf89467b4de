use serde::{Deserialize, Serialize};

use fairway_bestball::{BestBall, BestBallConfig, BestBallResult};
use fairway_core::game_registry::{GameEntry, GameKind};
use fairway_core::game_trait::{GameMetadata, WagerGame};
use fairway_core::round::RoundView;
use fairway_matchplay::{MatchPlay, MatchPlayConfig, MatchPlayResult};
use fairway_nassau::{Nassau, NassauConfig, NassauResult};
use fairway_skins::{Skins, SkinsConfig, SkinsResult};
use fairway_stableford::{Stableford, StablefordConfig, StablefordResult};
use fairway_wolf::{Wolf, WolfConfig, WolfResult};

/// One active game in a round, carrying its typed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameConfig {
    Skins(SkinsConfig),
    Nassau(NassauConfig),
    MatchPlay(MatchPlayConfig),
    Stableford(StablefordConfig),
    BestBall(BestBallConfig),
    Wolf(WolfConfig),
}

impl GameConfig {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Skins(_) => GameKind::Skins,
            Self::Nassau(_) => GameKind::Nassau,
            Self::MatchPlay(_) => GameKind::MatchPlay,
            Self::Stableford(_) => GameKind::Stableford,
            Self::BestBall(_) => GameKind::BestBall,
            Self::Wolf(_) => GameKind::Wolf,
        }
    }

    /// Run this game's calculator over the round.
    pub fn calculate(&self, round: &RoundView<'_>) -> GameResult {
        match self {
            Self::Skins(config) => GameResult::Skins(Skins.calculate(round, config)),
            Self::Nassau(config) => GameResult::Nassau(Nassau.calculate(round, config)),
            Self::MatchPlay(config) => GameResult::MatchPlay(MatchPlay.calculate(round, config)),
            Self::Stableford(config) => {
                GameResult::Stableford(Stableford.calculate(round, config))
            },
            Self::BestBall(config) => GameResult::BestBall(BestBall.calculate(round, config)),
            Self::Wolf(config) => GameResult::Wolf(Wolf.calculate(round, config)),
        }
    }
}

/// Output of one game calculator. Rebuilt from scratch on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Skins(SkinsResult),
    Nassau(NassauResult),
    MatchPlay(MatchPlayResult),
    Stableford(StablefordResult),
    BestBall(BestBallResult),
    Wolf(WolfResult),
}

impl GameResult {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Skins(_) => GameKind::Skins,
            Self::Nassau(_) => GameKind::Nassau,
            Self::MatchPlay(_) => GameKind::MatchPlay,
            Self::Stableford(_) => GameKind::Stableford,
            Self::BestBall(_) => GameKind::BestBall,
            Self::Wolf(_) => GameKind::Wolf,
        }
    }
}

/// Metadata for a game kind. `None` for side bets, which have no calculator.
pub fn metadata_for(kind: GameKind) -> Option<GameMetadata> {
    match kind {
        GameKind::Skins => Some(Skins.metadata()),
        GameKind::Nassau => Some(Nassau.metadata()),
        GameKind::MatchPlay => Some(MatchPlay.metadata()),
        GameKind::Stableford => Some(Stableford.metadata()),
        GameKind::BestBall => Some(BestBall.metadata()),
        GameKind::Wolf => Some(Wolf.metadata()),
        GameKind::SideBet => None,
    }
}

/// Every playable game, in display order.
pub fn catalog() -> Vec<GameEntry> {
    GameKind::GAMES
        .into_iter()
        .filter_map(|kind| metadata_for(kind).map(|metadata| GameEntry { kind, metadata }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::money::Cents;
    use fairway_core::strokes::StrokeAllocation;
    use fairway_core::test_helpers::{flat_scores, make_players};

    #[test]
    fn catalog_lists_all_six_games() {
        let entries = catalog();
        assert_eq!(entries.len(), 6);
        for entry in &entries {
            assert_eq!(entry.kind, entry.metadata.kind);
            assert!(entry.metadata.min_players <= entry.metadata.max_players);
        }
        assert!(metadata_for(GameKind::SideBet).is_none());
    }

    #[test]
    fn dispatch_keeps_the_game_kind() {
        let players = make_players(2);
        let strokes = StrokeAllocation::new();
        let scores = flat_scores(&players, 3, 4);
        let round = RoundView::new(&players, &scores, &[], &strokes);
        let config = GameConfig::MatchPlay(MatchPlayConfig {
            stakes: Cents::from_whole_dollars(10),
            net: true,
        });
        let result = config.calculate(&round);
        assert_eq!(result.kind(), config.kind());
        let GameResult::MatchPlay(outcome) = result else {
            panic!("expected a match play result");
        };
        assert_eq!(outcome.holes_played, 3);
        assert_eq!(outcome.margin, "All Square");
    }
}
