use serde::{Deserialize, Serialize};

use fairway_core::game_trait::PlayerId;
use fairway_core::player::Player;

/// Index of a team within its best ball game, starting at 1.
pub type TeamId = u8;

/// A side in a best ball game. Teammate order breaks ties for the
/// contributing score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<PlayerId>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, players: Vec<PlayerId>) -> Self {
        Self {
            id,
            name: name.into(),
            players,
        }
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.contains(&player_id)
    }
}

/// Teams used when a round does not name its own.
///
/// Four players pair up by input order (first two against last two). Any
/// other count plays as singles.
pub fn create_default_teams(players: &[Player]) -> Vec<Team> {
    if players.len() == 4 {
        return players
            .chunks(2)
            .zip(1..)
            .map(|(pair, id)| {
                let name = format!("{} & {}", pair[0].display_name, pair[1].display_name);
                Team::new(id, name, pair.iter().map(|p| p.id).collect())
            })
            .collect();
    }
    players
        .iter()
        .zip(1..)
        .map(|(player, id)| Team::new(id, player.display_name.clone(), vec![player.id]))
        .collect()
}
