use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// Handicap strokes granted per player per hole.
///
/// Produced by the external stroke allocator whenever a handicap or tee
/// changes. Holes without an entry grant no strokes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeAllocation {
    strokes: BTreeMap<PlayerId, BTreeMap<u8, i32>>,
}

impl StrokeAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, player_id: PlayerId, hole: u8, strokes: i32) -> Self {
        self.set(player_id, hole, strokes);
        self
    }

    pub fn set(&mut self, player_id: PlayerId, hole: u8, strokes: i32) {
        self.strokes.entry(player_id).or_default().insert(hole, strokes);
    }

    /// Strokes granted to `player_id` on `hole` (0 when not allocated).
    pub fn strokes(&self, player_id: PlayerId, hole: u8) -> i32 {
        self.strokes
            .get(&player_id)
            .and_then(|holes| holes.get(&hole))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.values().all(BTreeMap::is_empty)
    }
}

impl FromIterator<(PlayerId, u8, i32)> for StrokeAllocation {
    fn from_iter<I: IntoIterator<Item = (PlayerId, u8, i32)>>(iter: I) -> Self {
        let mut allocation = Self::new();
        for (player_id, hole, strokes) in iter {
            allocation.set(player_id, hole, strokes);
        }
        allocation
    }
}
