pub mod scoring;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::player::in_tee_order;
use fairway_core::round::RoundView;

pub use scoring::{StablefordVariant, points_for};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablefordConfig {
    pub variant: StablefordVariant,
    pub net: bool,
}

/// Points one player earned on one hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablefordHole {
    pub hole: u8,
    pub player_id: PlayerId,
    pub relative_to_par: i32,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablefordStanding {
    pub player_id: PlayerId,
    pub points: i32,
    pub holes_counted: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablefordResult {
    pub variant: StablefordVariant,
    /// Highest points first; equal totals keep tee order.
    pub standings: Vec<StablefordStanding>,
    pub holes: Vec<StablefordHole>,
    /// Distinct holes with at least one score entered. Display only.
    pub holes_scored: u32,
}

impl StablefordResult {
    pub fn leader(&self) -> Option<PlayerId> {
        self.standings.first().map(|s| s.player_id)
    }
}

/// The stableford calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stableford;

impl WagerGame for Stableford {
    type Config = StablefordConfig;
    type Outcome = StablefordResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::Stableford,
            name: "Stableford".to_string(),
            description: "Points per hole against par; most points wins.".to_string(),
            min_players: 1,
            max_players: 4,
            settles_money: false,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &StablefordConfig) -> StablefordResult {
        calculate_stableford(round, config)
    }
}

pub fn calculate_stableford(round: &RoundView<'_>, config: &StablefordConfig) -> StablefordResult {
    let order: Vec<PlayerId> = in_tee_order(round.players()).iter().map(|p| p.id).collect();
    let mut totals: BTreeMap<PlayerId, (i32, u32)> = BTreeMap::new();
    let mut holes = Vec::new();

    for hole in round.completed_holes() {
        let par = i32::from(round.par(hole));
        for &player_id in &order {
            let Some(score) = round.score(player_id, hole, config.net) else {
                continue;
            };
            let relative_to_par = score - par;
            let points = points_for(relative_to_par, config.variant);
            let entry = totals.entry(player_id).or_default();
            entry.0 += points;
            entry.1 += 1;
            holes.push(StablefordHole {
                hole,
                player_id,
                relative_to_par,
                points,
            });
        }
    }

    let mut standings: Vec<StablefordStanding> = order
        .iter()
        .map(|&player_id| {
            let (points, holes_counted) = totals.get(&player_id).copied().unwrap_or_default();
            StablefordStanding {
                player_id,
                points,
                holes_counted,
            }
        })
        .collect();
    // Stable sort keeps tee order among equal totals.
    standings.sort_by(|a, b| b.points.cmp(&a.points));

    StablefordResult {
        variant: config.variant,
        standings,
        holes,
        holes_scored: round.card().holes_with_scores().len() as u32,
    }
}
