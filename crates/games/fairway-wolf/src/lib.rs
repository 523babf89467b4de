pub mod rotation;
pub mod settlement;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::money::Cents;
use fairway_core::player::in_tee_order;
use fairway_core::round::RoundView;

pub use rotation::{WOLF_PLAYERS, hunting_order, wolf_for_hole};
pub use settlement::transfers;

/// Points per hunter when the wolf goes alone.
pub const LONE_WOLF_POINTS: u32 = 4;
/// Points per hunter for a blind wolf.
pub const BLIND_WOLF_POINTS: u32 = 8;
/// Points per team member in a two-on-two hole.
pub const PARTNER_POINTS: u32 = 2;
/// Points a pushed hole adds to the next hole when carryover is on.
pub const PUSH_CARRY_POINTS: u32 = 4;

/// How the wolf chose to play a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WolfMode {
    /// Alone against the three hunters. Blind means declared before any tee
    /// shot, doubling the points.
    Lone { blind: bool },
    Partner { partner: PlayerId },
}

/// The wolf's call on one hole. The last decision recorded for a hole wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfDecision {
    pub hole: u8,
    pub mode: WolfMode,
}

impl WolfDecision {
    pub fn lone(hole: u8, blind: bool) -> Self {
        Self {
            hole,
            mode: WolfMode::Lone { blind },
        }
    }

    pub fn partner(hole: u8, partner: PlayerId) -> Self {
        Self {
            hole,
            mode: WolfMode::Partner { partner },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfConfig {
    /// Paid per point.
    pub stakes: Cents,
    pub carryover: bool,
    pub net: bool,
    pub decisions: Vec<WolfDecision>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleOutcome {
    Wolf,
    Hunters,
    Push,
}

/// One scored wolf hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfHole {
    pub hole: u8,
    pub wolf: PlayerId,
    pub partner: Option<PlayerId>,
    pub blind: bool,
    pub outcome: HoleOutcome,
    /// Points riding on the hole, including any carried in.
    pub points: u32,
    pub carried_in: u32,
    /// In hunting order.
    pub winners: Vec<PlayerId>,
    /// In hunting order.
    pub losers: Vec<PlayerId>,
    /// Money won or lost on this hole per player, in hunting order.
    pub money: Vec<(PlayerId, Cents)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WolfStanding {
    pub player_id: PlayerId,
    /// Share of points won, for display. Money is settled from `earnings`.
    pub points: f64,
    pub earnings: Cents,
    pub holes_as_wolf: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WolfResult {
    /// Players by position; empty when wolf does not apply.
    pub order: Vec<PlayerId>,
    pub holes: Vec<WolfHole>,
    /// In position order.
    pub standings: Vec<WolfStanding>,
    /// Points riding into the next hole.
    pub carryover: u32,
    /// Wolf on the hole after the last completed one.
    pub next_wolf: Option<PlayerId>,
}

impl WolfResult {
    fn not_applicable() -> Self {
        Self {
            order: Vec::new(),
            holes: Vec::new(),
            standings: Vec::new(),
            carryover: 0,
            next_wolf: None,
        }
    }

    /// (player, earnings) pairs in position order.
    pub fn earnings(&self) -> Vec<(PlayerId, Cents)> {
        self.standings.iter().map(|s| (s.player_id, s.earnings)).collect()
    }
}

/// The wolf calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wolf;

impl WagerGame for Wolf {
    type Config = WolfConfig;
    type Outcome = WolfResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::Wolf,
            name: "Wolf".to_string(),
            description: "Rotating wolf picks a partner or goes alone against the pack."
                .to_string(),
            min_players: WOLF_PLAYERS as u8,
            max_players: WOLF_PLAYERS as u8,
            settles_money: true,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &WolfConfig) -> WolfResult {
        calculate_wolf(round, config)
    }
}

pub fn calculate_wolf(round: &RoundView<'_>, config: &WolfConfig) -> WolfResult {
    if round.player_count() != WOLF_PLAYERS {
        tracing::debug!(players = round.player_count(), "Wolf needs exactly four players");
        return WolfResult::not_applicable();
    }
    let order: Vec<PlayerId> = in_tee_order(round.players()).iter().map(|p| p.id).collect();

    let decisions: BTreeMap<u8, WolfMode> =
        config.decisions.iter().map(|d| (d.hole, d.mode)).collect();

    let mut standings: Vec<WolfStanding> = order
        .iter()
        .map(|&player_id| WolfStanding {
            player_id,
            points: 0.0,
            earnings: Cents::ZERO,
            holes_as_wolf: 0,
        })
        .collect();
    let mut holes = Vec::new();
    let mut carryover = 0u32;

    for hole in round.completed_holes() {
        let Some(wolf) = wolf_for_hole(&order, hole) else {
            continue;
        };
        let Some(&mode) = decisions.get(&hole) else {
            tracing::debug!(hole, "No wolf decision for hole, skipping");
            continue;
        };
        let hunting = hunting_order(&order, hole);
        let Some(scored) = score_hole(round, config, &hunting, hole, wolf, mode, carryover) else {
            continue;
        };

        carryover = match scored.outcome {
            HoleOutcome::Push if config.carryover => carryover + PUSH_CARRY_POINTS,
            _ => 0,
        };
        for standing in &mut standings {
            if standing.player_id == wolf {
                standing.holes_as_wolf += 1;
            }
            let won = scored.money.iter().find(|(id, _)| *id == standing.player_id);
            if let Some(&(_, amount)) = won {
                standing.earnings += amount;
            }
            standing.points += point_share(&scored, standing.player_id);
        }
        holes.push(scored);
    }

    let next_wolf = match round.thru() {
        None => wolf_for_hole(&order, 1),
        Some(thru) if thru < round.hole_count() => wolf_for_hole(&order, thru + 1),
        Some(_) => None,
    };

    WolfResult {
        order,
        holes,
        standings,
        carryover,
        next_wolf,
    }
}

/// Decide one hole. `None` when the decision does not fit the hole.
fn score_hole(
    round: &RoundView<'_>,
    config: &WolfConfig,
    hunting: &[PlayerId],
    hole: u8,
    wolf: PlayerId,
    mode: WolfMode,
    carried_in: u32,
) -> Option<WolfHole> {
    let (partner, blind, base_points) = match mode {
        WolfMode::Lone { blind } => {
            let per_hunter = if blind {
                BLIND_WOLF_POINTS
            } else {
                LONE_WOLF_POINTS
            };
            (None, blind, per_hunter * 3)
        },
        WolfMode::Partner { partner } => {
            if partner == wolf || !hunting.contains(&partner) {
                tracing::debug!(hole, wolf, partner, "Ignoring invalid wolf partner");
                return None;
            }
            (Some(partner), false, PARTNER_POINTS * 2)
        },
    };

    let (wolf_team, hunters): (Vec<PlayerId>, Vec<PlayerId>) = hunting
        .iter()
        .copied()
        .partition(|&id| id == wolf || Some(id) == partner);
    let best = |team: &[PlayerId]| {
        team.iter()
            .filter_map(|&id| round.score(id, hole, config.net))
            .min()
    };
    let (wolf_best, hunter_best) = (best(&wolf_team)?, best(&hunters)?);

    let outcome = match wolf_best.cmp(&hunter_best) {
        std::cmp::Ordering::Less => HoleOutcome::Wolf,
        std::cmp::Ordering::Greater => HoleOutcome::Hunters,
        std::cmp::Ordering::Equal => HoleOutcome::Push,
    };
    let points = base_points + carried_in;
    let (winners, losers) = match outcome {
        HoleOutcome::Wolf => (wolf_team, hunters),
        HoleOutcome::Hunters => (hunters, wolf_team),
        HoleOutcome::Push => (Vec::new(), Vec::new()),
    };

    let pot = config.stakes * i64::from(points);
    let mut money: Vec<(PlayerId, Cents)> = Vec::new();
    if !winners.is_empty() && !losers.is_empty() {
        money.extend(winners.iter().copied().zip(pot.split_evenly(winners.len())));
        money.extend(
            losers
                .iter()
                .copied()
                .zip(pot.split_evenly(losers.len()).into_iter().map(|c| -c)),
        );
        money.sort_by_key(|(id, _)| hunting.iter().position(|h| h == id));
    }

    Some(WolfHole {
        hole,
        wolf,
        partner,
        blind,
        outcome,
        points,
        carried_in,
        winners,
        losers,
        money,
    })
}

/// Fractional points `player_id` took from (or gave up on) a hole.
fn point_share(hole: &WolfHole, player_id: PlayerId) -> f64 {
    let points = f64::from(hole.points);
    if hole.winners.contains(&player_id) {
        points / hole.winners.len() as f64
    } else if hole.losers.contains(&player_id) {
        -points / hole.losers.len() as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::strokes::StrokeAllocation;
    use fairway_core::test_helpers::{
        contract_calculation_is_idempotent, contract_partial_hole_is_ignored,
        contract_unsupported_player_count_is_not_applicable, make_players, score_rows,
    };

    pub(crate) fn config(decisions: Vec<WolfDecision>) -> WolfConfig {
        WolfConfig {
            stakes: Cents::from_whole_dollars(4),
            carryover: true,
            net: false,
            decisions,
        }
    }

    pub(crate) fn lone(hole: u8, blind: bool) -> WolfDecision {
        WolfDecision::lone(hole, blind)
    }

    pub(crate) fn run(rows: &[(PlayerId, &[u8])], config: WolfConfig) -> WolfResult {
        let players = make_players(4);
        let strokes = StrokeAllocation::new();
        let scores = score_rows(rows);
        let round = RoundView::new(&players, &scores, &[], &strokes);
        calculate_wolf(&round, &config)
    }

    fn earnings_of(result: &WolfResult, id: PlayerId) -> Cents {
        result
            .standings
            .iter()
            .find(|s| s.player_id == id)
            .map(|s| s.earnings)
            .unwrap_or_default()
    }

    #[test]
    fn lone_wolf_win_pays_three_times_stakes_per_hunter() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[3]), (2, &[4]), (3, &[4]), (4, &[5])];
        let result = run(rows, config(vec![lone(1, false)]));
        let hole = &result.holes[0];
        assert_eq!(hole.wolf, 1);
        assert_eq!(hole.outcome, HoleOutcome::Wolf);
        assert_eq!(hole.points, 12);
        assert_eq!(earnings_of(&result, 1), Cents::from_whole_dollars(48));
        for hunter in 2..=4 {
            assert_eq!(earnings_of(&result, hunter), Cents::from_whole_dollars(-16));
        }
        assert_eq!(result.standings[0].points, 12.0);
        assert_eq!(result.standings[1].points, -4.0);
    }

    #[test]
    fn blind_wolf_doubles_the_points() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[5]), (2, &[4]), (3, &[6]), (4, &[6])];
        let result = run(rows, config(vec![lone(1, true)]));
        let hole = &result.holes[0];
        assert_eq!(hole.outcome, HoleOutcome::Hunters);
        assert_eq!(hole.points, 24);
        assert_eq!(earnings_of(&result, 1), Cents::from_whole_dollars(-96));
        assert_eq!(earnings_of(&result, 2), Cents::from_whole_dollars(32));
    }

    #[test]
    fn partner_hole_is_best_ball_two_on_two() {
        // Hole 2: player 2 is wolf and takes player 4.
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 4]), (2, &[4, 5]), (3, &[4, 5]), (4, &[4, 3])];
        let result = run(rows, config(vec![WolfDecision::partner(2, 4)]));
        assert_eq!(result.holes.len(), 1);
        let hole = &result.holes[0];
        assert_eq!(hole.wolf, 2);
        assert_eq!(hole.partner, Some(4));
        assert_eq!(hole.points, 4);
        assert_eq!(hole.winners, vec![4, 2]);
        assert_eq!(hole.losers, vec![3, 1]);
        assert_eq!(earnings_of(&result, 2), Cents::from_whole_dollars(8));
        assert_eq!(earnings_of(&result, 3), Cents::from_whole_dollars(-8));
        assert_eq!(result.standings[1].points, 2.0);
    }

    #[test]
    fn push_carries_four_points() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 4]), (2, &[4, 3]), (3, &[4, 5]), (4, &[4, 5])];
        let result = run(rows, config(vec![lone(1, false), lone(2, false)]));
        assert_eq!(result.holes[0].outcome, HoleOutcome::Push);
        assert!(result.holes[0].money.is_empty());
        assert_eq!(result.holes[1].carried_in, 4);
        assert_eq!(result.holes[1].points, 16);
        assert_eq!(result.carryover, 0);
        assert_eq!(earnings_of(&result, 2), Cents::from_whole_dollars(64));
    }

    #[test]
    fn push_without_carryover_is_dropped() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 4]), (2, &[4, 3]), (3, &[4, 5]), (4, &[4, 5])];
        let mut cfg = config(vec![lone(1, false), lone(2, false)]);
        cfg.carryover = false;
        let result = run(rows, cfg);
        assert_eq!(result.holes[1].points, 12);
    }

    #[test]
    fn uneven_money_goes_to_earlier_hunters() {
        // Two pushes in a row build the carry to eight points.
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 5]), (2, &[4, 4]), (3, &[4, 4]), (4, &[4, 4])];
        let mut cfg = config(vec![lone(1, false), lone(2, false)]);
        cfg.stakes = Cents(1);
        let result = run(rows, cfg);
        assert_eq!(result.holes[1].outcome, HoleOutcome::Push);
        assert_eq!(result.carryover, 8);

        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 5]), (2, &[4, 6]), (3, &[4, 4]), (4, &[4, 4])];
        let mut cfg = config(vec![lone(1, false), lone(2, false)]);
        cfg.stakes = Cents(1);
        let result = run(rows, cfg);
        // Hunters 3, 4 and 1 split 16 cents; the odd cent goes to the first.
        let money = &result.holes[1].money;
        let expected = vec![(3, Cents(6)), (4, Cents(5)), (1, Cents(5)), (2, Cents(-16))];
        assert_eq!(money, &expected);
        let total: Cents = result.standings.iter().map(|s| s.earnings).sum();
        assert_eq!(total, Cents::ZERO);
    }

    #[test]
    fn decisions_without_scores_or_invalid_partner_are_ignored() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4, 4]), (2, &[3, 4]), (3, &[4, 4]), (4, &[4, 4])];
        // Hole 1 has no decision; hole 2 names the wolf as partner.
        let result = run(rows, config(vec![WolfDecision::partner(2, 2)]));
        assert!(result.holes.is_empty());
        assert!(result.standings.iter().all(|s| s.earnings.is_zero()));
    }

    #[test]
    fn last_decision_for_a_hole_wins() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[3]), (2, &[4]), (3, &[4]), (4, &[5])];
        let decisions = vec![WolfDecision::partner(1, 2), lone(1, false)];
        let result = run(rows, config(decisions));
        assert_eq!(result.holes[0].partner, None);
        assert_eq!(result.holes[0].points, 12);
    }

    #[test]
    fn next_wolf_follows_rotation() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[4]), (2, &[4]), (3, &[4]), (4, &[4])];
        let result = run(rows, config(Vec::new()));
        assert_eq!(result.next_wolf, Some(2));
        let fresh = run(&[], config(Vec::new()));
        assert_eq!(fresh.next_wolf, Some(1));
    }

    #[test]
    fn three_players_is_not_applicable() {
        let result = contract_unsupported_player_count_is_not_applicable(
            &Wolf,
            3,
            &config(vec![lone(1, false)]),
        );
        assert!(result.standings.is_empty());
        assert!(result.holes.is_empty());
    }

    #[test]
    fn calculator_contracts() {
        let players = make_players(4);
        let scores = score_rows(&[(1, &[3, 4]), (2, &[4, 4]), (3, &[4, 5]), (4, &[5, 4])]);
        let cfg = config(vec![lone(1, false), WolfDecision::partner(2, 3)]);
        contract_calculation_is_idempotent(&Wolf, &players, &scores, &cfg);
        contract_partial_hole_is_ignored(&Wolf, &players, &scores, &cfg);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn decision_strategy() -> impl Strategy<Value = (bool, bool, usize)> {
            (proptest::bool::ANY, proptest::bool::ANY, 0usize..4)
        }

        proptest! {
            #[test]
            fn wolf_standings_sum_to_zero(
                grid in proptest::collection::vec(proptest::collection::vec(2u8..8, 18), 4),
                calls in proptest::collection::vec(decision_strategy(), 18),
                stakes in 1i64..500,
                carryover in proptest::bool::ANY,
            ) {
                let rows: Vec<(PlayerId, &[u8])> = grid
                    .iter()
                    .enumerate()
                    .map(|(i, row)| (i as PlayerId + 1, row.as_slice()))
                    .collect();
                let decisions = calls
                    .iter()
                    .zip(1u8..)
                    .map(|(&(alone, blind, partner), hole)| {
                        if alone {
                            WolfDecision::lone(hole, blind)
                        } else {
                            WolfDecision::partner(hole, partner as PlayerId + 1)
                        }
                    })
                    .collect();
                let mut cfg = config(decisions);
                cfg.stakes = Cents(stakes);
                cfg.carryover = carryover;
                let result = run(&rows, cfg);

                let total: Cents = result.standings.iter().map(|s| s.earnings).sum();
                prop_assert_eq!(total, Cents::ZERO);
                let points: f64 = result.standings.iter().map(|s| s.points).sum();
                prop_assert!(points.abs() < 1e-6);
            }
        }
    }
}
