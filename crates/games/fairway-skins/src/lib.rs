use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::money::Cents;
use fairway_core::player::in_tee_order;
use fairway_core::round::RoundView;

/// Settings for a skins game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsConfig {
    /// What each player puts in per skin.
    pub stakes: Cents,
    /// Tied holes roll their skin into the next hole.
    pub carryover: bool,
    pub net: bool,
}

/// Outcome of one completed hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsHole {
    pub hole: u8,
    pub winner: Option<PlayerId>,
    /// Skins riding on the hole, including any carried in.
    pub value: u32,
    /// The hole was tied and its skins rolled forward.
    pub carried: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsStanding {
    pub player_id: PlayerId,
    pub skins_won: u32,
    pub earnings: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinsResult {
    pub holes: Vec<SkinsHole>,
    /// One entry per player, in tee order.
    pub standings: Vec<SkinsStanding>,
    /// Skins still riding into the next hole.
    pub carryover: u32,
    pub holes_played: u32,
    pub skins_awarded: u32,
    /// Tied skins dropped because carryover is off.
    pub skins_lost: u32,
    pub pot_per_skin: Cents,
}

impl SkinsResult {
    fn not_applicable(config: &SkinsConfig) -> Self {
        Self {
            holes: Vec::new(),
            standings: Vec::new(),
            carryover: 0,
            holes_played: 0,
            skins_awarded: 0,
            skins_lost: 0,
            pot_per_skin: config.stakes,
        }
    }

    /// (player, earnings) pairs in tee order.
    pub fn earnings(&self) -> Vec<(PlayerId, Cents)> {
        self.standings.iter().map(|s| (s.player_id, s.earnings)).collect()
    }

    /// Win value of the next hole to be played.
    pub fn next_hole_value(&self) -> u32 {
        1 + self.carryover
    }
}

/// The skins calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Skins;

impl WagerGame for Skins {
    type Config = SkinsConfig;
    type Outcome = SkinsResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::Skins,
            name: "Skins".to_string(),
            description: "Lowest score alone on a hole takes the skin; ties carry over."
                .to_string(),
            min_players: 2,
            max_players: 4,
            settles_money: true,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &SkinsConfig) -> SkinsResult {
        calculate_skins(round, config)
    }
}

/// Run the skins game over every completed hole.
///
/// Earnings are `skins_won × pot_per_skin − skins_awarded × stakes`. Charging
/// only for skins that were actually awarded keeps the game zero-sum even when
/// the round ends on a carryover or skins were lost to ties.
pub fn calculate_skins(round: &RoundView<'_>, config: &SkinsConfig) -> SkinsResult {
    if round.player_count() < 2 {
        tracing::debug!(players = round.player_count(), "Skins needs at least two players");
        return SkinsResult::not_applicable(config);
    }

    let order: Vec<PlayerId> = in_tee_order(round.players()).iter().map(|p| p.id).collect();
    let mut won: BTreeMap<PlayerId, u32> = BTreeMap::new();
    let mut holes = Vec::new();
    let mut carryover = 0u32;
    let mut skins_awarded = 0u32;
    let mut skins_lost = 0u32;

    let completed = round.completed_holes();
    for &hole in &completed {
        let scores: Vec<(PlayerId, i32)> = order
            .iter()
            .filter_map(|&id| round.score(id, hole, config.net).map(|s| (id, s)))
            .collect();
        let Some(best) = scores.iter().map(|&(_, s)| s).min() else {
            continue;
        };
        let leaders: Vec<PlayerId> = scores
            .iter()
            .filter(|&&(_, s)| s == best)
            .map(|&(id, _)| id)
            .collect();

        let value = 1 + carryover;
        if let &[winner] = leaders.as_slice() {
            *won.entry(winner).or_default() += value;
            skins_awarded += value;
            carryover = 0;
            holes.push(SkinsHole {
                hole,
                winner: Some(winner),
                value,
                carried: false,
            });
        } else if config.carryover {
            carryover += 1;
            holes.push(SkinsHole {
                hole,
                winner: None,
                value,
                carried: true,
            });
        } else {
            skins_lost += 1;
            holes.push(SkinsHole {
                hole,
                winner: None,
                value,
                carried: false,
            });
        }
    }

    let pot_per_skin = config.stakes * order.len() as i64;
    let charged = config.stakes * i64::from(skins_awarded);
    let standings = order
        .iter()
        .map(|&player_id| {
            let skins_won = won.get(&player_id).copied().unwrap_or(0);
            SkinsStanding {
                player_id,
                skins_won,
                earnings: pot_per_skin * i64::from(skins_won) - charged,
            }
        })
        .collect();

    SkinsResult {
        holes,
        standings,
        carryover,
        holes_played: completed.len() as u32,
        skins_awarded,
        skins_lost,
        pot_per_skin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::scorecard::Score;
    use fairway_core::strokes::StrokeAllocation;
    use fairway_core::test_helpers::{
        contract_calculation_is_idempotent, contract_partial_hole_is_ignored,
        contract_unsupported_player_count_is_not_applicable, make_players, score_rows,
    };

    fn config(carryover: bool) -> SkinsConfig {
        SkinsConfig {
            stakes: Cents::from_whole_dollars(1),
            carryover,
            net: false,
        }
    }

    fn run(scores: &[Score], players: usize, cfg: &SkinsConfig) -> SkinsResult {
        let players = make_players(players);
        let strokes = StrokeAllocation::new();
        let round = RoundView::new(&players, scores, &[], &strokes);
        calculate_skins(&round, cfg)
    }

    #[test]
    fn outright_low_score_wins_the_skin() {
        let scores = score_rows(&[(1, &[3]), (2, &[4]), (3, &[5])]);
        let result = run(&scores, 3, &config(true));
        assert_eq!(result.holes[0].winner, Some(1));
        assert_eq!(result.standings[0].skins_won, 1);
        // Pot per skin is $3; everyone is charged $1 for the one awarded skin.
        assert_eq!(result.standings[0].earnings, Cents(200));
        assert_eq!(result.standings[1].earnings, Cents(-100));
        assert_eq!(result.standings[2].earnings, Cents(-100));
    }

    #[test]
    fn tie_carries_into_next_hole() {
        let scores = score_rows(&[(1, &[4, 4, 3]), (2, &[4, 4, 5])]);
        let result = run(&scores, 2, &config(true));
        assert!(result.holes[0].carried);
        assert!(result.holes[1].carried);
        assert_eq!(result.holes[2].value, 3);
        assert_eq!(result.holes[2].winner, Some(1));
        assert_eq!(result.carryover, 0);
        assert_eq!(result.standings[0].skins_won, 3);
    }

    #[test]
    fn carryover_resets_after_a_win() {
        let scores = score_rows(&[(1, &[4, 3, 5, 4]), (2, &[4, 4, 4, 4])]);
        let result = run(&scores, 2, &config(true));
        assert_eq!(result.holes[1].value, 2);
        assert_eq!(result.holes[2].value, 1);
        assert_eq!(result.holes[3].value, 1);
        assert!(result.holes[3].carried);
        assert_eq!(result.carryover, 1);
        assert_eq!(result.next_hole_value(), 2);
    }

    #[test]
    fn tie_without_carryover_loses_the_skin() {
        let scores = score_rows(&[(1, &[4, 3]), (2, &[4, 4])]);
        let result = run(&scores, 2, &config(false));
        assert!(!result.holes[0].carried);
        assert_eq!(result.holes[1].value, 1);
        assert_eq!(result.skins_lost, 1);
        assert_eq!(result.carryover, 0);
        assert_eq!(result.standings[0].earnings, Cents(100));
        assert_eq!(result.standings[1].earnings, Cents(-100));
    }

    #[test]
    fn net_scoring_uses_handicap_strokes() {
        let players = make_players(2);
        let strokes = StrokeAllocation::new().with(2, 1, 1);
        let scores = score_rows(&[(1, &[4]), (2, &[4])]);
        let round = RoundView::new(&players, &scores, &[], &strokes);
        let mut cfg = config(true);
        cfg.net = true;
        assert_eq!(calculate_skins(&round, &cfg).holes[0].winner, Some(2));
        cfg.net = false;
        assert_eq!(calculate_skins(&round, &cfg).holes[0].winner, None);
    }

    #[test]
    fn awarded_skins_account_for_every_hole() {
        let scores = score_rows(&[
            (1, &[4, 4, 3, 5, 4, 4]),
            (2, &[4, 5, 3, 4, 4, 5]),
            (3, &[5, 4, 3, 6, 4, 4]),
        ]);
        let result = run(&scores, 3, &config(true));
        assert_eq!(
            result.skins_awarded + result.carryover,
            result.holes_played,
            "awarded skins must equal holes played minus outstanding carryover"
        );
        let total: Cents = result.standings.iter().map(|s| s.earnings).sum();
        assert_eq!(total, Cents::ZERO);
    }

    #[test]
    fn single_player_is_not_applicable() {
        let result = contract_unsupported_player_count_is_not_applicable(&Skins, 1, &config(true));
        assert!(result.standings.is_empty());
        assert!(result.holes.is_empty());
    }

    #[test]
    fn calculator_contracts() {
        let players = make_players(3);
        let scores = score_rows(&[(1, &[4, 3, 5]), (2, &[4, 4, 4]), (3, &[5, 4, 4])]);
        contract_calculation_is_idempotent(&Skins, &players, &scores, &config(true));
        contract_partial_hole_is_ignored(&Skins, &players, &scores, &config(true));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn skins_always_sum_to_zero(
                grid in proptest::collection::vec(proptest::collection::vec(2u8..9, 18), 2..=4),
                carryover in proptest::bool::ANY,
            ) {
                let rows: Vec<(PlayerId, &[u8])> = grid
                    .iter()
                    .enumerate()
                    .map(|(i, row)| (i as PlayerId + 1, row.as_slice()))
                    .collect();
                let scores = score_rows(&rows);
                let result = run(&scores, grid.len(), &config(carryover));

                let total: Cents = result.standings.iter().map(|s| s.earnings).sum();
                prop_assert_eq!(total, Cents::ZERO);
                prop_assert_eq!(
                    result.skins_awarded + result.carryover + result.skins_lost,
                    result.holes_played
                );
                if carryover {
                    prop_assert_eq!(result.skins_lost, 0);
                } else {
                    prop_assert_eq!(result.carryover, 0);
                }
            }
        }
    }
}
