use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::PlayerId;
use fairway_core::money::Cents;
use fairway_core::player::in_tee_order;
use fairway_core::round::RoundView;

use crate::settlement::{NetSettlement, SideBet};
use crate::{RoundReport, RoundSnapshot, evaluate_round};

/// One player's running position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBalance {
    pub player_id: PlayerId,
    pub display_name: String,
    pub balance: Cents,
    /// Movement caused by the most recently completed hole.
    pub hole_delta: Cents,
}

/// The largest single movement on the latest hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swing {
    pub player_id: PlayerId,
    pub display_name: String,
    pub hole: u8,
    pub amount: Cents,
}

/// Balance movement since the tracker's previous update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub player_id: PlayerId,
    pub previous: Cents,
    pub current: Cents,
    pub delta: Cents,
}

/// Running money picture for broadcast after every score change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMoneyState {
    pub thru: Option<u8>,
    /// In tee order.
    pub players: Vec<PlayerBalance>,
    pub by_game: BTreeMap<GameKind, BTreeMap<PlayerId, Cents>>,
    pub settlements: Vec<NetSettlement>,
    pub biggest_swing: Option<Swing>,
    /// Players whose balance moved since the previous update.
    pub changes: Vec<BalanceChange>,
}

impl LiveMoneyState {
    pub fn balance(&self, player_id: PlayerId) -> Cents {
        self.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.balance)
            .unwrap_or_default()
    }
}

/// Remembers the last state so each update can report what moved.
#[derive(Debug, Clone, Default)]
pub struct LiveMoneyTracker {
    previous: Option<LiveMoneyState>,
}

impl LiveMoneyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the live state from the latest snapshot.
    pub fn update(&mut self, snapshot: &RoundSnapshot) -> LiveMoneyState {
        let state = live_state(snapshot, self.previous.as_ref());
        self.previous = Some(state.clone());
        state
    }

    pub fn previous(&self) -> Option<&LiveMoneyState> {
        self.previous.as_ref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Live state for `snapshot`, with `changes` measured against `previous`.
pub fn live_state(snapshot: &RoundSnapshot, previous: Option<&LiveMoneyState>) -> LiveMoneyState {
    let round = snapshot.round();
    let completed = round.completed_holes();
    let thru = completed.last().copied();
    let before = completed.iter().rev().nth(1).copied().unwrap_or(0);

    let current = report_through(snapshot, &round, thru.unwrap_or(0));
    let prior = report_through(snapshot, &round, before);

    let players: Vec<PlayerBalance> = in_tee_order(&snapshot.players)
        .into_iter()
        .map(|player| {
            let balance = current.balance(player.id);
            PlayerBalance {
                player_id: player.id,
                display_name: player.display_name.clone(),
                balance,
                hole_delta: balance - prior.balance(player.id),
            }
        })
        .collect();

    let biggest_swing = thru.and_then(|hole| biggest_swing(&players, hole));
    let changes = previous
        .map(|previous| balance_changes(previous, &players))
        .unwrap_or_default();

    if let Some(swing) = &biggest_swing {
        tracing::debug!(
            hole = swing.hole,
            player_id = swing.player_id,
            amount = %swing.amount,
            "Biggest swing"
        );
    }

    LiveMoneyState {
        thru,
        players,
        by_game: current.by_game,
        settlements: current.settlements,
        biggest_swing,
        changes,
    }
}

/// Evaluate the round as it stood after `last_hole`. Side bets tied to a hole
/// count only once that hole is complete, even when later holes are.
fn report_through(snapshot: &RoundSnapshot, round: &RoundView<'_>, last_hole: u8) -> RoundReport {
    let round = round.truncated(last_hole);
    let side_bets: Vec<SideBet> = snapshot
        .side_bets
        .iter()
        .filter(|bet| bet.hole.is_none_or(|hole| round.is_complete(hole)))
        .cloned()
        .collect();
    evaluate_round(&round, &snapshot.games, &side_bets)
}

/// Largest non-zero hole movement; ties go to the earlier tee position.
fn biggest_swing(players: &[PlayerBalance], hole: u8) -> Option<Swing> {
    let mut best: Option<&PlayerBalance> = None;
    for player in players {
        if player.hole_delta.is_zero() {
            continue;
        }
        if best.is_none_or(|b| player.hole_delta.abs() > b.hole_delta.abs()) {
            best = Some(player);
        }
    }
    best.map(|player| Swing {
        player_id: player.player_id,
        display_name: player.display_name.clone(),
        hole,
        amount: player.hole_delta,
    })
}

fn balance_changes(previous: &LiveMoneyState, players: &[PlayerBalance]) -> Vec<BalanceChange> {
    players
        .iter()
        .filter_map(|player| {
            let before = previous.balance(player.player_id);
            let delta = player.balance - before;
            (!delta.is_zero()).then_some(BalanceChange {
                player_id: player.player_id,
                previous: before,
                current: player.balance,
                delta,
            })
        })
        .collect()
}
