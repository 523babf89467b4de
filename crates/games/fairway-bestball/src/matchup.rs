use serde::{Deserialize, Serialize};

use fairway_core::context::Urgency;
use fairway_core::money::{Cents, Transfer};

use crate::BestBallHole;
use crate::teams::{Team, TeamId};

/// Head-to-head view of a best ball game between exactly two teams.
///
/// Reports only the current margin and leader; there is no dormie or
/// early-win handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub teams: [TeamId; 2],
    pub holes_won: [u32; 2],
    pub leader: Option<TeamId>,
    pub holes_up: u32,
    pub holes_remaining: u32,
    /// "All Square" or "{team} {up} UP".
    pub text: String,
    pub urgency: Urgency,
}

impl TeamMatch {
    /// Every hole has been played.
    pub fn is_over(&self) -> bool {
        self.holes_remaining == 0
    }

    /// The leading team once the match is over.
    pub fn winner(&self) -> Option<TeamId> {
        if self.is_over() { self.leader } else { None }
    }

    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner()?;
        self.teams.into_iter().find(|&id| id != winner)
    }
}

/// Build the match between `teams[0]` and `teams[1]` from the per-hole
/// winners. `None` unless exactly two teams are playing.
pub fn team_match(
    teams: &[Team],
    holes: &[BestBallHole],
    holes_remaining: u32,
) -> Option<TeamMatch> {
    let [first, second] = teams else {
        return None;
    };
    let mut holes_won = [0u32; 2];
    for hole in holes {
        match hole.winner {
            Some(id) if id == first.id => holes_won[0] += 1,
            Some(id) if id == second.id => holes_won[1] += 1,
            _ => {},
        }
    }

    let holes_up = holes_won[0].abs_diff(holes_won[1]);
    let leader = match holes_won[0].cmp(&holes_won[1]) {
        std::cmp::Ordering::Greater => Some(first),
        std::cmp::Ordering::Less => Some(second),
        std::cmp::Ordering::Equal => None,
    };
    let text = match leader {
        Some(team) => format!("{} {holes_up} UP", team.name),
        None => "All Square".to_string(),
    };

    Some(TeamMatch {
        teams: [first.id, second.id],
        holes_won,
        leader: leader.map(|team| team.id),
        holes_up,
        holes_remaining,
        text,
        urgency: Urgency::classify(holes_up, holes_remaining),
    })
}

/// Live context for the next hole of a two-team match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleContext {
    /// Next hole to be played, or `None` once the match is over.
    pub next_hole: Option<u8>,
    pub leader: Option<TeamId>,
    pub holes_up: u32,
    pub holes_remaining: u32,
    pub urgency: Urgency,
    pub text: String,
}

pub fn hole_context(matchup: &TeamMatch, thru: Option<u8>) -> HoleContext {
    let next_hole = if matchup.is_over() {
        None
    } else {
        Some(thru.map_or(1, |hole| hole.saturating_add(1)))
    };
    HoleContext {
        next_hole,
        leader: matchup.leader,
        holes_up: matchup.holes_up,
        holes_remaining: matchup.holes_remaining,
        urgency: matchup.urgency,
        text: matchup.text.clone(),
    }
}

/// Money owed once the match is over: every member of the losing team pays
/// `stakes`, split evenly among the winning team.
pub fn match_payouts(matchup: &TeamMatch, teams: &[Team], stakes: Cents) -> Vec<Transfer> {
    let (Some(winner), Some(loser)) = (matchup.winner(), matchup.loser()) else {
        return Vec::new();
    };
    let find = |id: TeamId| teams.iter().find(|team| team.id == id);
    let (Some(winners), Some(losers)) = (find(winner), find(loser)) else {
        return Vec::new();
    };
    if winners.players.is_empty() {
        return Vec::new();
    }

    let mut transfers = Vec::new();
    for &from in &losers.players {
        let shares = stakes.split_evenly(winners.players.len());
        for (&to, amount) in winners.players.iter().zip(shares) {
            if amount.is_positive() {
                transfers.push(Transfer { from, to, amount });
            }
        }
    }
    transfers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<Team> {
        vec![
            Team::new(1, "Aces", vec![1, 2]),
            Team::new(2, "Birdies", vec![3, 4]),
        ]
    }

    fn holes(winners: &[Option<TeamId>]) -> Vec<BestBallHole> {
        winners
            .iter()
            .zip(1..)
            .map(|(&winner, hole)| BestBallHole {
                hole,
                scores: Vec::new(),
                winner,
            })
            .collect()
    }

    #[test]
    fn leader_and_text_follow_holes_won() {
        let played = holes(&[Some(1), None, Some(1), Some(2)]);
        let matchup = team_match(&teams(), &played, 14).unwrap();
        assert_eq!(matchup.holes_won, [2, 1]);
        assert_eq!(matchup.leader, Some(1));
        assert_eq!(matchup.text, "Aces 1 UP");
        assert_eq!(matchup.urgency, Urgency::Normal);
        assert_eq!(matchup.winner(), None);
    }

    #[test]
    fn level_match_is_all_square() {
        let matchup = team_match(&teams(), &holes(&[Some(2), Some(1)]), 2).unwrap();
        assert_eq!(matchup.text, "All Square");
        assert_eq!(matchup.urgency, Urgency::Critical);
    }

    #[test]
    fn needs_exactly_two_teams() {
        let mut three = teams();
        three.push(Team::new(3, "Eagles", vec![5]));
        assert!(team_match(&three, &[], 18).is_none());
        assert!(team_match(&three[..1], &[], 18).is_none());
    }

    #[test]
    fn context_points_at_next_hole() {
        let matchup = team_match(&teams(), &holes(&[Some(2), Some(2), Some(2)]), 15).unwrap();
        let ctx = hole_context(&matchup, Some(3));
        assert_eq!(ctx.next_hole, Some(4));
        assert_eq!(ctx.urgency, Urgency::Opportunity);
        assert_eq!(ctx.text, "Birdies 3 UP");
    }

    #[test]
    fn finished_match_pays_each_loser_stakes() {
        let matchup = team_match(&teams(), &holes(&[Some(2)]), 0).unwrap();
        let transfers = match_payouts(&matchup, &teams(), Cents::from_whole_dollars(5));
        assert_eq!(transfers.len(), 4);
        let received: Cents = transfers.iter().filter(|t| t.to == 3).map(|t| t.amount).sum();
        assert_eq!(received, Cents(500));
        let paid: Cents = transfers.iter().filter(|t| t.from == 1).map(|t| t.amount).sum();
        assert_eq!(paid, Cents(500));
    }

    #[test]
    fn unfinished_or_tied_match_pays_nothing() {
        let live = team_match(&teams(), &holes(&[Some(2)]), 3).unwrap();
        assert!(match_payouts(&live, &teams(), Cents(500)).is_empty());
        let halved = team_match(&teams(), &holes(&[Some(1), Some(2)]), 0).unwrap();
        assert!(match_payouts(&halved, &teams(), Cents(500)).is_empty());
    }

    #[test]
    fn uneven_split_keeps_every_cent() {
        let teams = vec![Team::new(1, "Solo", vec![1]), Team::new(2, "Trio", vec![2, 3, 4])];
        let matchup = team_match(&teams, &holes(&[Some(1)]), 0).unwrap();
        let transfers = match_payouts(&matchup, &teams, Cents(100));
        let total: Cents = transfers.iter().map(|t| t.amount).sum();
        assert_eq!(total, Cents(300));
        assert!(transfers.iter().all(|t| t.to == 1));
    }
}
