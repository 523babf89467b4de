use crate::course::{self, HoleInfo};
use crate::game_trait::PlayerId;
use crate::player::Player;
use crate::scorecard::{Score, Scorecard};
use crate::strokes::StrokeAllocation;

/// Read-only view of a round that every calculator works from.
///
/// Holds the current full snapshot of scores. Calculators never mutate it;
/// a new view is built after every score change.
#[derive(Debug, Clone)]
pub struct RoundView<'a> {
    players: &'a [Player],
    holes: &'a [HoleInfo],
    strokes: &'a StrokeAllocation,
    card: Scorecard,
    hole_count: u8,
}

impl<'a> RoundView<'a> {
    pub fn new(
        players: &'a [Player],
        scores: &[Score],
        holes: &'a [HoleInfo],
        strokes: &'a StrokeAllocation,
    ) -> Self {
        Self::from_card(players, Scorecard::from_scores(scores), holes, strokes)
    }

    pub fn from_card(
        players: &'a [Player],
        card: Scorecard,
        holes: &'a [HoleInfo],
        strokes: &'a StrokeAllocation,
    ) -> Self {
        Self {
            players,
            holes,
            strokes,
            card,
            hole_count: course::hole_count(holes),
        }
    }

    pub fn players(&self) -> &'a [Player] {
        self.players
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn holes(&self) -> &'a [HoleInfo] {
        self.holes
    }

    pub fn card(&self) -> &Scorecard {
        &self.card
    }

    /// Number of holes in the round (18 when no course data is supplied).
    pub fn hole_count(&self) -> u8 {
        self.hole_count
    }

    pub fn par(&self, hole: u8) -> u8 {
        course::par_for(self.holes, hole)
    }

    pub fn gross(&self, player_id: PlayerId, hole: u8) -> Option<u8> {
        self.card.gross(player_id, hole)
    }

    /// Score used for comparison: gross, or gross minus handicap strokes.
    pub fn score(&self, player_id: PlayerId, hole: u8, net: bool) -> Option<i32> {
        let gross = i32::from(self.gross(player_id, hole)?);
        if net {
            Some(gross - self.strokes.strokes(player_id, hole))
        } else {
            Some(gross)
        }
    }

    /// Whether every player in the round has a score for `hole`.
    pub fn is_complete(&self, hole: u8) -> bool {
        self.card.is_hole_complete(hole, &self.player_ids())
    }

    /// Completed holes in ascending order, limited to the round's holes.
    pub fn completed_holes(&self) -> Vec<u8> {
        let ids = self.player_ids();
        (1..=self.hole_count)
            .filter(|&hole| self.card.is_hole_complete(hole, &ids))
            .collect()
    }

    pub fn holes_played(&self) -> u8 {
        self.completed_holes().len() as u8
    }

    pub fn holes_remaining(&self) -> u8 {
        self.hole_count.saturating_sub(self.holes_played())
    }

    /// Highest hole that every player has completed.
    pub fn thru(&self) -> Option<u8> {
        self.completed_holes().last().copied()
    }

    /// The same round as it stood after `last_hole`.
    pub fn truncated(&self, last_hole: u8) -> Self {
        Self {
            players: self.players,
            holes: self.holes,
            strokes: self.strokes,
            card: self.card.truncated(last_hole),
            hole_count: self.hole_count,
        }
    }
}
