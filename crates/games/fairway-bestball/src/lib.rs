pub mod matchup;
pub mod teams;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::money::{Cents, Transfer};
use fairway_core::round::RoundView;

pub use matchup::{HoleContext, TeamMatch, hole_context, match_payouts, team_match};
pub use teams::{Team, TeamId, create_default_teams};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBallConfig {
    /// Empty means the default pairing for the round's players.
    pub teams: Vec<Team>,
    pub net: bool,
    /// Owed by each losing team member when a two-team match finishes.
    pub stakes: Cents,
}

/// A team's counted score on one hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamHoleScore {
    pub team_id: TeamId,
    pub score: i32,
    /// The teammate whose score counted.
    pub contributor: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBallHole {
    pub hole: u8,
    pub scores: Vec<TeamHoleScore>,
    /// Team with the strictly lowest score, if any.
    pub winner: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub total: i32,
    pub to_par: i32,
    pub holes_played: u32,
    pub holes_won: u32,
    /// Holes on which each teammate's score counted.
    pub contributions: BTreeMap<PlayerId, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestBallResult {
    pub teams: Vec<Team>,
    /// Sorted by score to par, ties in team order.
    pub standings: Vec<TeamStanding>,
    pub holes: Vec<BestBallHole>,
    /// Present when exactly two teams are playing.
    pub matchup: Option<TeamMatch>,
    pub payouts: Vec<Transfer>,
}

impl BestBallResult {
    pub fn standing(&self, team_id: TeamId) -> Option<&TeamStanding> {
        self.standings.iter().find(|s| s.team_id == team_id)
    }
}

/// The best ball calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestBall;

impl WagerGame for BestBall {
    type Config = BestBallConfig;
    type Outcome = BestBallResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::BestBall,
            name: "Best Ball".to_string(),
            description: "Each team counts its lowest score on every hole.".to_string(),
            min_players: 2,
            max_players: 4,
            settles_money: true,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &BestBallConfig) -> BestBallResult {
        calculate_best_ball(round, config)
    }
}

pub fn calculate_best_ball(round: &RoundView<'_>, config: &BestBallConfig) -> BestBallResult {
    let teams = if config.teams.is_empty() {
        create_default_teams(round.players())
    } else {
        config.teams.clone()
    };

    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| TeamStanding {
            team_id: team.id,
            name: team.name.clone(),
            total: 0,
            to_par: 0,
            holes_played: 0,
            holes_won: 0,
            contributions: team.players.iter().map(|&id| (id, 0)).collect(),
        })
        .collect();

    let mut holes = Vec::new();
    for hole in round.completed_holes() {
        let par = i32::from(round.par(hole));
        let mut scores = Vec::new();
        for (team, standing) in teams.iter().zip(standings.iter_mut()) {
            let Some((contributor, score)) = team_best(round, team, hole, config.net) else {
                tracing::debug!(team = team.id, hole, "Team has no score on hole, skipping");
                continue;
            };
            standing.total += score;
            standing.to_par += score - par;
            standing.holes_played += 1;
            *standing.contributions.entry(contributor).or_default() += 1;
            scores.push(TeamHoleScore {
                team_id: team.id,
                score,
                contributor,
            });
        }

        let winner = hole_winner(&scores);
        if let Some(team_id) = winner
            && let Some(standing) = standings.iter_mut().find(|s| s.team_id == team_id)
        {
            standing.holes_won += 1;
        }
        holes.push(BestBallHole {
            hole,
            scores,
            winner,
        });
    }

    // Stable sort keeps team order for equal scores.
    standings.sort_by_key(|s| s.to_par);

    let matchup = team_match(&teams, &holes, u32::from(round.holes_remaining()));
    let payouts = matchup
        .as_ref()
        .map(|m| match_payouts(m, &teams, config.stakes))
        .unwrap_or_default();

    BestBallResult {
        teams,
        standings,
        holes,
        matchup,
        payouts,
    }
}

/// Lowest score among teammates on `hole`; the first listed teammate wins ties.
fn team_best(round: &RoundView<'_>, team: &Team, hole: u8, net: bool) -> Option<(PlayerId, i32)> {
    let mut best: Option<(PlayerId, i32)> = None;
    for &player_id in &team.players {
        let Some(score) = round.score(player_id, hole, net) else {
            continue;
        };
        if best.is_none_or(|(_, current)| score < current) {
            best = Some((player_id, score));
        }
    }
    best
}

fn hole_winner(scores: &[TeamHoleScore]) -> Option<TeamId> {
    if scores.len() < 2 {
        return None;
    }
    let best = scores.iter().map(|s| s.score).min()?;
    match scores.iter().filter(|s| s.score == best).collect::<Vec<_>>().as_slice() {
        [only] => Some(only.team_id),
        _ => None,
    }
}
