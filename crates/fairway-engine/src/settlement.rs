use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::PlayerId;
use fairway_core::money::{Cents, Transfer, distribute_proportionally};

use crate::game::{GameConfig, GameResult};

/// An ad-hoc prop bet with a single winner, e.g. closest to the pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBet {
    pub label: String,
    /// Hole the bet was decided on, if it belongs to one.
    pub hole: Option<u8>,
    /// Paid to the winner by every other player.
    pub stakes: Cents,
    /// `None` while the bet is undecided.
    pub winner: Option<PlayerId>,
}

/// One gross debt recorded before netting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: GameKind,
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Cents,
}

/// A single payment in the final, netted settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSettlement {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Cents,
}

/// Every debt the round's games and side bets produced, tagged by source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the ledger for a round. `configs` and `results` are paired in
    /// order; `players` is everyone in the round.
    pub fn from_round(
        configs: &[GameConfig],
        results: &[GameResult],
        side_bets: &[SideBet],
        players: &[PlayerId],
    ) -> Self {
        let mut ledger = Self::new();
        for (config, result) in configs.iter().zip(results) {
            ledger.record_game(config, result);
        }
        for bet in side_bets {
            ledger.record_side_bet(bet, players);
        }
        ledger
    }

    /// Record `from` owing `to`. Self-payments and zero amounts are dropped;
    /// a negative amount is recorded in the other direction.
    pub fn record(&mut self, kind: GameKind, from: PlayerId, to: PlayerId, amount: Cents) {
        if from == to || amount.is_zero() {
            return;
        }
        let (from, to, amount) = if amount.is_negative() {
            (to, from, -amount)
        } else {
            (from, to, amount)
        };
        self.entries.push(LedgerEntry {
            kind,
            from,
            to,
            amount,
        });
    }

    pub fn record_transfers(&mut self, kind: GameKind, transfers: &[Transfer]) {
        for transfer in transfers {
            self.record(kind, transfer.from, transfer.to, transfer.amount);
        }
    }

    /// Add the debts one game produced.
    pub fn record_game(&mut self, config: &GameConfig, result: &GameResult) {
        match (config, result) {
            (GameConfig::Skins(_), GameResult::Skins(skins)) => {
                let transfers = distribute_proportionally(&skins.earnings());
                self.record_transfers(GameKind::Skins, &transfers);
            },
            (GameConfig::Nassau(_), GameResult::Nassau(nassau)) => {
                for s in &nassau.settlements {
                    self.record(GameKind::Nassau, s.from, s.to, s.amount);
                }
            },
            (GameConfig::MatchPlay(config), GameResult::MatchPlay(matchplay)) => {
                if let (Some(winner), Some(loser)) = (matchplay.winner(), matchplay.loser()) {
                    self.record(GameKind::MatchPlay, loser, winner, config.stakes);
                }
            },
            (GameConfig::Stableford(_), GameResult::Stableford(_)) => {},
            (GameConfig::BestBall(_), GameResult::BestBall(bestball)) => {
                self.record_transfers(GameKind::BestBall, &bestball.payouts);
            },
            (GameConfig::Wolf(_), GameResult::Wolf(wolf)) => {
                self.record_transfers(GameKind::Wolf, &fairway_wolf::transfers(wolf));
            },
            (config, result) => {
                tracing::warn!(
                    config = %config.kind(),
                    result = %result.kind(),
                    "Game result does not match its config, not settling"
                );
            },
        }
    }

    /// The winner collects `stakes` from every other player. Undecided bets
    /// are skipped.
    pub fn record_side_bet(&mut self, bet: &SideBet, players: &[PlayerId]) {
        let Some(winner) = bet.winner else {
            tracing::debug!(label = %bet.label, "Side bet undecided, skipping");
            return;
        };
        for &player in players {
            self.record(GameKind::SideBet, player, winner, bet.stakes);
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gross amount `from` owes `to` across every source.
    pub fn owed(&self, from: PlayerId, to: PlayerId) -> Cents {
        self.entries
            .iter()
            .filter(|e| e.from == from && e.to == to)
            .map(|e| e.amount)
            .sum()
    }

    /// Net position per player: positive means the player is owed money.
    pub fn balances(&self) -> BTreeMap<PlayerId, Cents> {
        let mut balances = BTreeMap::new();
        for entry in &self.entries {
            *balances.entry(entry.to).or_insert(Cents::ZERO) += entry.amount;
            *balances.entry(entry.from).or_insert(Cents::ZERO) -= entry.amount;
        }
        balances
    }

    /// Net position per player, broken down by the game that produced it.
    pub fn balances_by_game(&self) -> BTreeMap<GameKind, BTreeMap<PlayerId, Cents>> {
        let mut by_game: BTreeMap<GameKind, BTreeMap<PlayerId, Cents>> = BTreeMap::new();
        for entry in &self.entries {
            let game = by_game.entry(entry.kind).or_default();
            *game.entry(entry.to).or_insert(Cents::ZERO) += entry.amount;
            *game.entry(entry.from).or_insert(Cents::ZERO) -= entry.amount;
        }
        by_game
    }

    /// Collapse the ledger into one payment per pair of players.
    pub fn net(&self) -> Vec<NetSettlement> {
        net_settlements(&self.entries)
    }
}

/// Net every pair of players against each other.
///
/// For each unordered pair the smaller debt is cancelled against the larger
/// and one payment covers the difference; pairs that cancel out are omitted.
/// Sorted by amount (largest first), then payer, then payee.
pub fn net_settlements(entries: &[LedgerEntry]) -> Vec<NetSettlement> {
    // Keyed by (low id, high id); positive means low owes high.
    let mut pairs: BTreeMap<(PlayerId, PlayerId), Cents> = BTreeMap::new();
    for entry in entries {
        if entry.from == entry.to {
            continue;
        }
        if entry.from < entry.to {
            *pairs.entry((entry.from, entry.to)).or_default() += entry.amount;
        } else {
            *pairs.entry((entry.to, entry.from)).or_default() -= entry.amount;
        }
    }

    let mut settlements: Vec<NetSettlement> = pairs
        .into_iter()
        .filter(|(_, net)| !net.is_zero())
        .map(|((low, high), net)| {
            if net.is_positive() {
                NetSettlement {
                    from: low,
                    to: high,
                    amount: net,
                }
            } else {
                NetSettlement {
                    from: high,
                    to: low,
                    amount: -net,
                }
            }
        })
        .collect();
    settlements.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then(a.from.cmp(&b.from))
            .then(a.to.cmp(&b.to))
    });
    settlements
}
