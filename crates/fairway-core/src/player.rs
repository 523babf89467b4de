use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// A golfer taking part in the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Handicap index as supplied by the profile service.
    pub handicap_index: f32,
    /// Tee order. Drives wolf rotation; position 0 created the round.
    pub position: u8,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>, position: u8) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            handicap_index: 0.0,
            position,
        }
    }

    pub fn with_handicap(mut self, handicap_index: f32) -> Self {
        self.handicap_index = handicap_index;
        self
    }
}

/// Players sorted by tee order, ties broken by id.
pub fn in_tee_order(players: &[Player]) -> Vec<&Player> {
    let mut ordered: Vec<&Player> = players.iter().collect();
    ordered.sort_by_key(|p| (p.position, p.id));
    ordered
}

/// The player who created the round (lowest position).
pub fn creator(players: &[Player]) -> Option<&Player> {
    in_tee_order(players).into_iter().next()
}

/// Display name lookup with a fallback for ids that are not in the round.
pub fn display_name(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| format!("Player {id}"))
}
