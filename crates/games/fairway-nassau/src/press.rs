use serde::{Deserialize, Serialize};

use fairway_core::game_trait::PlayerId;
use fairway_core::money::Cents;
use fairway_core::round::RoundView;

use crate::{NassauConfig, NassauResult, running_totals};

/// Most presses that can be live in one round.
pub const MAX_PRESSES: usize = 3;

/// Strokes a player must be behind before pressing.
pub const PRESS_DEFICIT: i32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressStatus {
    #[default]
    Active,
    /// Withdrawn by agreement; never settled.
    Cancelled,
}

/// A side bet started mid-round by the trailing player. Runs from
/// `start_hole` through the last hole of the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Press {
    pub start_hole: u8,
    pub initiator: PlayerId,
    pub stakes: Cents,
    #[serde(default)]
    pub status: PressStatus,
}

impl Press {
    pub fn new(start_hole: u8, initiator: PlayerId, stakes: Cents) -> Self {
        Self {
            start_hole,
            initiator,
            stakes,
            status: PressStatus::Active,
        }
    }
}

/// Why a press request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressDenied {
    NotInMatch(PlayerId),
    NoHolesRemaining,
    LimitReached,
    /// The requester is fewer than [`PRESS_DEFICIT`] strokes behind.
    NotFarEnoughBehind { strokes_down: i32 },
}

impl std::fmt::Display for PressDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInMatch(id) => write!(f, "player {id} is not in this nassau"),
            Self::NoHolesRemaining => write!(f, "no holes remain to press over"),
            Self::LimitReached => write!(f, "already {MAX_PRESSES} presses in play"),
            Self::NotFarEnoughBehind { strokes_down } => write!(
                f,
                "must be {PRESS_DEFICIT} strokes down to press (currently {strokes_down})"
            ),
        }
    }
}

impl std::error::Error for PressDenied {}

/// Check whether `requester` may press right now.
///
/// Allowed only when the requester is at least [`PRESS_DEFICIT`] strokes down
/// overall, fewer than [`MAX_PRESSES`] presses exist, and a hole remains.
pub fn check_press(result: &NassauResult, requester: PlayerId) -> Result<(), PressDenied> {
    if !result.players.contains(&requester) {
        return Err(PressDenied::NotInMatch(requester));
    }
    if result.holes_remaining == 0 {
        return Err(PressDenied::NoHolesRemaining);
    }
    if result.presses.len() >= MAX_PRESSES {
        return Err(PressDenied::LimitReached);
    }
    let strokes_down = result
        .overall()
        .map(|overall| overall.strokes_down(requester))
        .unwrap_or(0);
    if strokes_down < PRESS_DEFICIT {
        return Err(PressDenied::NotFarEnoughBehind { strokes_down });
    }
    Ok(())
}

pub fn can_press(result: &NassauResult, requester: PlayerId) -> bool {
    check_press(result, requester).is_ok()
}

/// Build the press `requester` would start on the next hole.
pub fn next_press(
    result: &NassauResult,
    requester: PlayerId,
    stakes: Cents,
) -> Result<Press, PressDenied> {
    check_press(result, requester)?;
    let start_hole = match result.thru {
        Some(thru) => thru.checked_add(1),
        None => Some(1),
    };
    match start_hole {
        Some(start_hole) if start_hole <= result.hole_count => {
            Ok(Press::new(start_hole, requester, stakes))
        },
        _ => Err(PressDenied::NoHolesRemaining),
    }
}

/// Presses in play, ordered by starting hole, each flagged with whether it
/// was generated automatically.
pub(crate) fn live_presses(
    round: &RoundView<'_>,
    pair: [PlayerId; 2],
    config: &NassauConfig,
) -> Vec<(Press, bool)> {
    let hole_count = round.hole_count();
    let mut presses: Vec<(Press, bool)> = Vec::new();
    for press in &config.presses {
        let usable = press.status == PressStatus::Active
            && (1..=hole_count).contains(&press.start_hole)
            && pair.contains(&press.initiator);
        if !usable {
            tracing::debug!(
                start_hole = press.start_hole,
                initiator = press.initiator,
                "Ignoring press that cannot be played"
            );
            continue;
        }
        if presses.len() == MAX_PRESSES {
            tracing::debug!(start_hole = press.start_hole, "Ignoring press over the limit");
            continue;
        }
        presses.push((press.clone(), false));
    }

    if config.auto_press {
        add_auto_presses(round, pair, config, &mut presses);
    }
    presses.sort_by_key(|(press, _)| press.start_hole);
    presses
}

/// After each completed hole, press for a player who has fallen
/// [`PRESS_DEFICIT`] strokes behind in the most recent live bet.
fn add_auto_presses(
    round: &RoundView<'_>,
    pair: [PlayerId; 2],
    config: &NassauConfig,
    presses: &mut Vec<(Press, bool)>,
) {
    let hole_count = round.hole_count();
    for hole in round.completed_holes() {
        if presses.len() >= MAX_PRESSES || hole >= hole_count {
            break;
        }
        let next = hole + 1;
        if presses.iter().any(|(p, _)| p.start_hole == next) {
            continue;
        }
        let since = presses
            .iter()
            .map(|(p, _)| p.start_hole)
            .filter(|&start| start <= hole)
            .max()
            .unwrap_or(1);
        let (a, b, _) = running_totals(round, pair, config.net, since, hole);
        let trailing = if a - b >= PRESS_DEFICIT {
            pair[0]
        } else if b - a >= PRESS_DEFICIT {
            pair[1]
        } else {
            continue;
        };
        presses.push((Press::new(next, trailing, config.stakes), true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{config, two_rows};
    use crate::{BetKind, calculate_nassau};
    use fairway_core::course::HoleInfo;
    use fairway_core::scorecard::Score;
    use fairway_core::strokes::StrokeAllocation;
    use fairway_core::test_helpers::make_players;

    fn nassau(a: &[u8], b: &[u8], presses: Vec<Press>, auto: bool) -> NassauResult {
        let players = make_players(2);
        let strokes = StrokeAllocation::new();
        let scores = two_rows(a, b);
        let round = RoundView::new(&players, &scores, &[], &strokes);
        calculate_nassau(&round, &config(presses, auto))
    }

    #[test]
    fn two_down_may_press() {
        let result = nassau(&[5, 5], &[4, 4], Vec::new(), false);
        assert_eq!(check_press(&result, 1), Ok(()));
        assert!(can_press(&result, 1));
        let press = next_press(&result, 1, Cents::from_whole_dollars(5)).unwrap();
        assert_eq!(press.start_hole, 3);
        assert_eq!(press.initiator, 1);
    }

    #[test]
    fn one_down_or_leading_may_not_press() {
        let result = nassau(&[5, 4], &[4, 4], Vec::new(), false);
        assert_eq!(
            check_press(&result, 1),
            Err(PressDenied::NotFarEnoughBehind { strokes_down: 1 })
        );
        assert_eq!(
            check_press(&result, 2),
            Err(PressDenied::NotFarEnoughBehind { strokes_down: -1 })
        );
    }

    #[test]
    fn press_limit_is_three() {
        let stakes = Cents::from_whole_dollars(5);
        let presses = vec![
            Press::new(2, 1, stakes),
            Press::new(3, 1, stakes),
            Press::new(4, 1, stakes),
            Press::new(5, 1, stakes),
        ];
        let result = nassau(&[6, 6, 6], &[4, 4, 4], presses, false);
        assert_eq!(result.presses.len(), MAX_PRESSES);
        assert_eq!(check_press(&result, 1), Err(PressDenied::LimitReached));
    }

    #[test]
    fn no_press_after_the_last_hole() {
        let result = nassau(&[5; 18], &[4; 18], Vec::new(), false);
        assert_eq!(check_press(&result, 1), Err(PressDenied::NoHolesRemaining));
    }

    #[test]
    fn no_press_past_the_highest_hole_number() {
        // Hole 255 is done but hole 1 is still open.
        let players = make_players(2);
        let holes: Vec<HoleInfo> = (1..=u8::MAX).map(|n| HoleInfo::new(n, 4)).collect();
        let strokes = StrokeAllocation::new();
        let mut scores = vec![Score::new(1, 1, 4)];
        for hole in 2..=u8::MAX {
            scores.push(Score::new(1, hole, 5));
            scores.push(Score::new(2, hole, 4));
        }
        let round = RoundView::new(&players, &scores, &holes, &strokes);
        let result = calculate_nassau(&round, &config(Vec::new(), false));
        assert_eq!(result.thru, Some(u8::MAX));
        assert_eq!(check_press(&result, 1), Ok(()));
        assert_eq!(
            next_press(&result, 1, Cents::from_whole_dollars(5)),
            Err(PressDenied::NoHolesRemaining)
        );
    }

    #[test]
    fn outsider_cannot_press() {
        let result = nassau(&[5, 5], &[4, 4], Vec::new(), false);
        assert_eq!(check_press(&result, 9), Err(PressDenied::NotInMatch(9)));
        assert_eq!(
            check_press(&result, 9).unwrap_err().to_string(),
            "player 9 is not in this nassau"
        );
    }

    #[test]
    fn press_starting_past_the_round_is_dropped() {
        let press = Press::new(19, 1, Cents::from_whole_dollars(5));
        let result = nassau(&[5, 5], &[4, 4], vec![press], false);
        assert!(result.presses.is_empty());
    }

    #[test]
    fn auto_press_fires_when_two_down() {
        // Player 1 is two down after hole 2, so a press starts at hole 3.
        let result = nassau(&[5, 5, 4, 4], &[4, 4, 4, 4], Vec::new(), true);
        assert_eq!(result.presses.len(), 1);
        let press = &result.presses[0];
        assert_eq!(press.first_hole, 3);
        assert_eq!(
            press.kind,
            BetKind::Press {
                number: 1,
                initiator: 1,
                auto: true
            }
        );
    }

    #[test]
    fn auto_press_measures_from_latest_press() {
        // Two down after hole 2 (press from 3), then two down again in that
        // press after hole 4 (press from 5).
        let result = nassau(&[5, 5, 5, 5, 4], &[4, 4, 4, 4, 4], Vec::new(), true);
        let starts: Vec<u8> = result.presses.iter().map(|p| p.first_hole).collect();
        assert_eq!(starts, vec![3, 5]);
    }

    #[test]
    fn auto_press_respects_manual_presses_and_limit() {
        let stakes = Cents::from_whole_dollars(5);
        let manual = vec![Press::new(2, 1, stakes), Press::new(3, 1, stakes)];
        let result = nassau(&[6, 6, 6, 6, 6], &[4, 4, 4, 4, 4], manual, true);
        assert_eq!(result.presses.len(), MAX_PRESSES);
        assert!(matches!(
            result.presses[2].kind,
            BetKind::Press { auto: true, .. }
        ));
    }
}
