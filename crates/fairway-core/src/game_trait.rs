use serde::{Deserialize, Serialize};

use crate::game_registry::GameKind;
use crate::round::RoundView;

/// Unique identifier for a player in the round.
pub type PlayerId = u64;

/// Core trait that every wagering game calculator implements.
///
/// The engine owns the score snapshot, configuration and settlement; a game
/// only turns the current round into its own result. Implementations must be
/// pure: the same round and config always produce an identical outcome.
pub trait WagerGame {
    /// Typed, already-validated configuration for one instance of the game.
    type Config;
    /// Standings and per-hole ledger produced by the calculator.
    type Outcome;

    /// Game metadata for the game picker.
    fn metadata(&self) -> GameMetadata;

    /// Recompute the game from scratch over the round snapshot.
    fn calculate(&self, round: &RoundView<'_>, config: &Self::Config) -> Self::Outcome;

    /// Whether the game can be played with `count` players.
    fn supports_player_count(&self, count: usize) -> bool {
        let meta = self.metadata();
        (usize::from(meta.min_players)..=usize::from(meta.max_players)).contains(&count)
    }
}

/// Game metadata for the game picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub kind: GameKind,
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
    /// Whether results feed the settlement ledger.
    pub settles_money: bool,
}
