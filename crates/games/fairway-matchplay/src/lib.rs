pub mod status;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::money::Cents;
use fairway_core::player::{display_name, in_tee_order};
use fairway_core::round::RoundView;

pub use status::{MatchStatus, margin_text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPlayConfig {
    /// Paid in full by the loser once the match is won.
    pub stakes: Cents,
    pub net: bool,
}

/// One completed hole of the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHole {
    pub hole: u8,
    /// `None` when the hole was halved.
    pub winner: Option<PlayerId>,
    /// Running margin after this hole; positive means the first player leads.
    pub running: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPlayResult {
    /// The two players in tee order; empty when the match does not apply.
    pub players: Vec<PlayerId>,
    pub status: MatchStatus,
    pub leader: Option<PlayerId>,
    pub holes_up: u32,
    pub holes_played: u32,
    pub holes_remaining: u32,
    pub margin: String,
    pub holes: Vec<MatchHole>,
}

impl MatchPlayResult {
    fn not_applicable(hole_count: u8) -> Self {
        Self {
            players: Vec::new(),
            status: MatchStatus::NotStarted,
            leader: None,
            holes_up: 0,
            holes_played: 0,
            holes_remaining: u32::from(hole_count),
            margin: margin_text(MatchStatus::NotStarted, 0, 0, None),
            holes: Vec::new(),
        }
    }

    /// The match winner, once the match is won.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            MatchStatus::Won => self.leader,
            _ => None,
        }
    }

    /// The other player, once the match is won.
    pub fn loser(&self) -> Option<PlayerId> {
        let winner = self.winner()?;
        self.players.iter().copied().find(|&id| id != winner)
    }
}

/// The match play calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchPlay;

impl WagerGame for MatchPlay {
    type Config = MatchPlayConfig;
    type Outcome = MatchPlayResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::MatchPlay,
            name: "Match Play".to_string(),
            description: "Hole-by-hole duel; win more holes than are left to play.".to_string(),
            min_players: 2,
            max_players: 2,
            settles_money: true,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &MatchPlayConfig) -> MatchPlayResult {
        calculate_match_play(round, config)
    }
}

pub fn calculate_match_play(round: &RoundView<'_>, config: &MatchPlayConfig) -> MatchPlayResult {
    if round.player_count() != 2 {
        tracing::debug!(players = round.player_count(), "Match play needs exactly two players");
        return MatchPlayResult::not_applicable(round.hole_count());
    }
    let order = in_tee_order(round.players());
    let (first, second) = (order[0].id, order[1].id);

    let hole_count = u32::from(round.hole_count());
    let mut running = 0i32;
    let mut holes = Vec::new();
    for hole in round.completed_holes() {
        let (Some(a), Some(b)) = (
            round.score(first, hole, config.net),
            round.score(second, hole, config.net),
        ) else {
            continue;
        };
        let winner = match a.cmp(&b) {
            std::cmp::Ordering::Less => {
                running += 1;
                Some(first)
            },
            std::cmp::Ordering::Greater => {
                running -= 1;
                Some(second)
            },
            std::cmp::Ordering::Equal => None,
        };
        holes.push(MatchHole {
            hole,
            winner,
            running,
        });

        // Holes after the match is won are byes and leave the result alone.
        let played = holes.len() as u32;
        let remaining = hole_count.saturating_sub(played);
        if MatchStatus::classify(played, running.unsigned_abs(), remaining) == MatchStatus::Won {
            tracing::debug!(hole, "Match decided");
            break;
        }
    }

    let holes_played = holes.len() as u32;
    let holes_remaining = hole_count.saturating_sub(holes_played);
    let holes_up = running.unsigned_abs();
    let leader = match running.signum() {
        1 => Some(first),
        -1 => Some(second),
        _ => None,
    };
    let status = MatchStatus::classify(holes_played, holes_up, holes_remaining);
    let leader_name = leader.map(|id| display_name(round.players(), id));

    MatchPlayResult {
        players: vec![first, second],
        status,
        leader,
        holes_up,
        holes_played,
        holes_remaining,
        margin: margin_text(status, holes_up, holes_remaining, leader_name.as_deref()),
        holes,
    }
}
