pub mod context;
pub mod press;

use serde::{Deserialize, Serialize};

use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::{GameMetadata, PlayerId, WagerGame};
use fairway_core::money::Cents;
use fairway_core::player::in_tee_order;
use fairway_core::round::RoundView;

pub use context::{NassauContext, nassau_context};
pub use press::{
    MAX_PRESSES, PRESS_DEFICIT, Press, PressDenied, PressStatus, can_press, check_press,
    next_press,
};

/// Last hole of the front nine.
pub const FRONT_NINE_END: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauConfig {
    /// Paid for each of the front, back and overall bets.
    pub stakes: Cents,
    pub net: bool,
    /// Press automatically for a player who falls two strokes behind.
    pub auto_press: bool,
    /// Presses called by the players so far.
    pub presses: Vec<Press>,
}

/// The three standing bets of a nassau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Front,
    Back,
    Overall,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Front, Segment::Back, Segment::Overall];

    pub fn label(self) -> &'static str {
        match self {
            Self::Front => "Front 9",
            Self::Back => "Back 9",
            Self::Overall => "Overall",
        }
    }

    /// First and last hole of the segment; empty when `first > last`.
    pub fn hole_range(self, hole_count: u8) -> (u8, u8) {
        match self {
            Self::Front => (1, hole_count.min(FRONT_NINE_END)),
            Self::Back => (FRONT_NINE_END + 1, hole_count),
            Self::Overall => (1, hole_count),
        }
    }

    /// The nine `hole` belongs to.
    pub fn containing(hole: u8) -> Self {
        if hole <= FRONT_NINE_END {
            Self::Front
        } else {
            Self::Back
        }
    }
}

/// What a [`BetStanding`] is tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    Segment(Segment),
    Press {
        /// 1-based, in order of starting hole.
        number: u8,
        initiator: PlayerId,
        auto: bool,
    },
}

/// Live stroke-play standing of one bet over a range of holes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetStanding {
    pub kind: BetKind,
    pub label: String,
    pub first_hole: u8,
    pub last_hole: u8,
    pub stakes: Cents,
    /// Running totals over completed holes, in tee order.
    pub totals: Vec<(PlayerId, i32)>,
    pub holes_completed: u32,
    pub holes_total: u32,
    /// Every hole in the range has been completed.
    pub complete: bool,
    pub leader: Option<PlayerId>,
    /// Strokes between the two players.
    pub margin: u32,
    /// Set once the bet is complete and not tied.
    pub winner: Option<PlayerId>,
}

impl BetStanding {
    pub fn holes_remaining(&self) -> u32 {
        self.holes_total - self.holes_completed
    }

    /// Strokes `player_id` is behind (negative when ahead).
    pub fn strokes_down(&self, player_id: PlayerId) -> i32 {
        let mine = self.totals.iter().find(|(id, _)| *id == player_id);
        let theirs = self.totals.iter().find(|(id, _)| *id != player_id);
        match (mine, theirs) {
            (Some((_, mine)), Some((_, theirs))) => mine - theirs,
            _ => 0,
        }
    }
}

/// A payment owed from a completed nassau bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauSettlement {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Cents,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauResult {
    /// The two players in tee order; empty when the game does not apply.
    pub players: Vec<PlayerId>,
    pub segments: Vec<BetStanding>,
    pub presses: Vec<BetStanding>,
    pub settlements: Vec<NassauSettlement>,
    pub hole_count: u8,
    pub holes_played: u32,
    pub holes_remaining: u32,
    /// Highest completed hole.
    pub thru: Option<u8>,
}

impl NassauResult {
    fn not_applicable(hole_count: u8) -> Self {
        Self {
            players: Vec::new(),
            segments: Vec::new(),
            presses: Vec::new(),
            settlements: Vec::new(),
            hole_count,
            holes_played: 0,
            holes_remaining: u32::from(hole_count),
            thru: None,
        }
    }

    pub fn segment(&self, segment: Segment) -> Option<&BetStanding> {
        self.segments
            .iter()
            .find(|bet| bet.kind == BetKind::Segment(segment))
    }

    pub fn overall(&self) -> Option<&BetStanding> {
        self.segment(Segment::Overall)
    }
}

/// The nassau calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nassau;

impl WagerGame for Nassau {
    type Config = NassauConfig;
    type Outcome = NassauResult;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::Nassau,
            name: "Nassau".to_string(),
            description: "Front nine, back nine and overall bets, with presses.".to_string(),
            min_players: 2,
            max_players: 2,
            settles_money: true,
        }
    }

    fn calculate(&self, round: &RoundView<'_>, config: &NassauConfig) -> NassauResult {
        calculate_nassau(round, config)
    }
}

pub fn calculate_nassau(round: &RoundView<'_>, config: &NassauConfig) -> NassauResult {
    let hole_count = round.hole_count();
    if round.player_count() != 2 {
        tracing::debug!(players = round.player_count(), "Nassau needs exactly two players");
        return NassauResult::not_applicable(hole_count);
    }
    let order = in_tee_order(round.players());
    let pair = [order[0].id, order[1].id];

    let segments: Vec<BetStanding> = Segment::ALL
        .into_iter()
        .filter_map(|segment| {
            let (first, last) = segment.hole_range(hole_count);
            (first <= last).then(|| {
                evaluate_bet(
                    round,
                    pair,
                    config.net,
                    BetKind::Segment(segment),
                    segment.label().to_string(),
                    (first, last),
                    config.stakes,
                )
            })
        })
        .collect();

    let presses: Vec<BetStanding> = press::live_presses(round, pair, config)
        .into_iter()
        .enumerate()
        .map(|(i, (p, auto))| {
            let number = i as u8 + 1;
            evaluate_bet(
                round,
                pair,
                config.net,
                BetKind::Press {
                    number,
                    initiator: p.initiator,
                    auto,
                },
                format!("Press {number} (holes {}-{hole_count})", p.start_hole),
                (p.start_hole, hole_count),
                p.stakes,
            )
        })
        .collect();

    let settlements = segments
        .iter()
        .chain(&presses)
        .filter_map(|bet| {
            let winner = bet.winner?;
            let loser = pair.into_iter().find(|&id| id != winner)?;
            (!bet.stakes.is_zero()).then(|| NassauSettlement {
                from: loser,
                to: winner,
                amount: bet.stakes,
                label: bet.label.clone(),
            })
        })
        .collect();

    let holes_played = u32::from(round.holes_played());
    NassauResult {
        players: pair.to_vec(),
        segments,
        presses,
        settlements,
        hole_count,
        holes_played,
        holes_remaining: u32::from(hole_count).saturating_sub(holes_played),
        thru: round.thru(),
    }
}

/// Totals for both players over completed holes in `first..=last`, plus the
/// number of holes that counted.
pub(crate) fn running_totals(
    round: &RoundView<'_>,
    pair: [PlayerId; 2],
    net: bool,
    first: u8,
    last: u8,
) -> (i32, i32, u32) {
    let mut totals = (0, 0, 0);
    for hole in first..=last {
        if !round.is_complete(hole) {
            continue;
        }
        let (Some(a), Some(b)) = (round.score(pair[0], hole, net), round.score(pair[1], hole, net))
        else {
            continue;
        };
        totals.0 += a;
        totals.1 += b;
        totals.2 += 1;
    }
    totals
}

fn evaluate_bet(
    round: &RoundView<'_>,
    pair: [PlayerId; 2],
    net: bool,
    kind: BetKind,
    label: String,
    (first_hole, last_hole): (u8, u8),
    stakes: Cents,
) -> BetStanding {
    let (a, b, holes_completed) = running_totals(round, pair, net, first_hole, last_hole);
    let holes_total = u32::from(last_hole.saturating_sub(first_hole)) + 1;
    let complete = holes_completed == holes_total;
    let leader = match a.cmp(&b) {
        _ if holes_completed == 0 => None,
        std::cmp::Ordering::Less => Some(pair[0]),
        std::cmp::Ordering::Greater => Some(pair[1]),
        std::cmp::Ordering::Equal => None,
    };
    BetStanding {
        kind,
        label,
        first_hole,
        last_hole,
        stakes,
        totals: vec![(pair[0], a), (pair[1], b)],
        holes_completed,
        holes_total,
        complete,
        leader,
        margin: a.abs_diff(b),
        winner: if complete { leader } else { None },
    }
}
