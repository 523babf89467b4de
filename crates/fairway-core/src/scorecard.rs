use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// A gross score entered by the scorekeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player_id: PlayerId,
    pub hole: u8,
    pub strokes: u8,
}

impl Score {
    pub fn new(player_id: PlayerId, hole: u8, strokes: u8) -> Self {
        Self {
            player_id,
            hole,
            strokes,
        }
    }
}

/// Gross strokes keyed by (player, hole).
///
/// Built from the raw score list in arrival order, so a later entry for the
/// same player and hole replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    gross: BTreeMap<(PlayerId, u8), u8>,
}

impl Scorecard {
    pub fn from_scores(scores: &[Score]) -> Self {
        let mut card = Self::default();
        for score in scores {
            card.record(*score);
        }
        card
    }

    pub fn record(&mut self, score: Score) {
        self.gross.insert((score.player_id, score.hole), score.strokes);
    }

    pub fn gross(&self, player_id: PlayerId, hole: u8) -> Option<u8> {
        self.gross.get(&(player_id, hole)).copied()
    }

    /// True when every listed player has a score for `hole`.
    /// An empty player list never completes a hole.
    pub fn is_hole_complete(&self, hole: u8, player_ids: &[PlayerId]) -> bool {
        !player_ids.is_empty() && player_ids.iter().all(|&p| self.gross(p, hole).is_some())
    }

    /// Distinct holes with at least one recorded score.
    pub fn holes_with_scores(&self) -> BTreeSet<u8> {
        self.gross.keys().map(|&(_, hole)| hole).collect()
    }

    /// A copy holding only holes up to and including `last_hole`.
    pub fn truncated(&self, last_hole: u8) -> Self {
        Self {
            gross: self
                .gross
                .iter()
                .filter(|((_, hole), _)| *hole <= last_hole)
                .map(|(&key, &strokes)| (key, strokes))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.gross.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gross.is_empty()
    }
}
