pub mod game;
pub mod input;
pub mod live;
pub mod settlement;
pub mod snapshot;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use fairway_core::course::HoleInfo;
use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::PlayerId;
use fairway_core::money::Cents;
use fairway_core::player::Player;
use fairway_core::round::RoundView;
use fairway_core::scorecard::{Score, Scorecard};
use fairway_core::strokes::StrokeAllocation;

pub use game::{GameConfig, GameResult, catalog};
pub use input::{InputError, InputFormat, RoundInput};
pub use live::{LiveMoneyState, LiveMoneyTracker};
pub use settlement::{Ledger, NetSettlement, SideBet};
pub use snapshot::SnapshotError;

/// Everything known about a round at one moment: the input to every
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub players: Vec<Player>,
    pub holes: Vec<HoleInfo>,
    /// In arrival order; a later score for the same player and hole wins.
    pub scores: Vec<Score>,
    pub strokes: StrokeAllocation,
    pub games: Vec<GameConfig>,
    pub side_bets: Vec<SideBet>,
}

impl RoundSnapshot {
    pub fn new(players: Vec<Player>, holes: Vec<HoleInfo>) -> Self {
        Self {
            players,
            holes,
            scores: Vec::new(),
            strokes: StrokeAllocation::new(),
            games: Vec::new(),
            side_bets: Vec::new(),
        }
    }

    /// Read-only view for the calculators. Scores from players who are not
    /// in the round are dropped.
    pub fn round(&self) -> RoundView<'_> {
        let ids: BTreeSet<PlayerId> = self.players.iter().map(|p| p.id).collect();
        let mut card = Scorecard::default();
        for score in &self.scores {
            if ids.contains(&score.player_id) {
                card.record(*score);
            } else {
                tracing::warn!(
                    player_id = score.player_id,
                    hole = score.hole,
                    "Dropping score for a player not in the round"
                );
            }
        }
        RoundView::from_card(&self.players, card, &self.holes, &self.strokes)
    }
}

/// Results of every game plus the settled money for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Highest hole every player has completed.
    pub thru: Option<u8>,
    /// One per configured game, in configuration order.
    pub results: Vec<GameResult>,
    pub ledger: Ledger,
    /// Every player in the round, including those at zero.
    pub balances: BTreeMap<PlayerId, Cents>,
    pub by_game: BTreeMap<GameKind, BTreeMap<PlayerId, Cents>>,
    pub settlements: Vec<NetSettlement>,
}

impl RoundReport {
    pub fn balance(&self, player_id: PlayerId) -> Cents {
        self.balances.get(&player_id).copied().unwrap_or_default()
    }
}

/// Run every game and settle the round.
pub fn evaluate(snapshot: &RoundSnapshot) -> RoundReport {
    evaluate_round(&snapshot.round(), &snapshot.games, &snapshot.side_bets)
}

/// Run `games` over `round` and net their debts together with `side_bets`.
pub fn evaluate_round(
    round: &RoundView<'_>,
    games: &[GameConfig],
    side_bets: &[SideBet],
) -> RoundReport {
    let results: Vec<GameResult> = games.iter().map(|game| game.calculate(round)).collect();
    let player_ids = round.player_ids();
    let ledger = Ledger::from_round(games, &results, side_bets, &player_ids);

    let mut balances: BTreeMap<PlayerId, Cents> =
        player_ids.iter().map(|&id| (id, Cents::ZERO)).collect();
    for (id, amount) in ledger.balances() {
        *balances.entry(id).or_default() += amount;
    }
    let by_game = ledger.balances_by_game();
    let settlements = ledger.net();

    tracing::debug!(
        games = results.len(),
        entries = ledger.entries().len(),
        settlements = settlements.len(),
        "Round evaluated"
    );

    RoundReport {
        thru: round.thru(),
        results,
        ledger,
        balances,
        by_game,
        settlements,
    }
}
