use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_trait::GameMetadata;

/// Every game type the engine knows how to calculate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Skins,
    Nassau,
    MatchPlay,
    Stableford,
    BestBall,
    Wolf,
    /// Ad-hoc prop and side bets settled alongside the games.
    SideBet,
}

impl GameKind {
    pub const GAMES: [GameKind; 6] = [
        GameKind::Skins,
        GameKind::Nassau,
        GameKind::MatchPlay,
        GameKind::Stableford,
        GameKind::BestBall,
        GameKind::Wolf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skins => "skins",
            Self::Nassau => "nassau",
            Self::MatchPlay => "match_play",
            Self::Stableford => "stableford",
            Self::BestBall => "best_ball",
            Self::Wolf => "wolf",
            Self::SideBet => "side_bet",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered game entry in the game catalog.
#[derive(Debug, Clone)]
pub struct GameEntry {
    pub kind: GameKind,
    pub metadata: GameMetadata,
}
