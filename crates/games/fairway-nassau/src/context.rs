use serde::{Deserialize, Serialize};

use fairway_core::context::Urgency;
use fairway_core::game_trait::PlayerId;
use fairway_core::player::{Player, display_name};

use crate::{NassauResult, Segment};

/// Where the nassau stands for the nine currently being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NassauContext {
    pub segment: Segment,
    pub segment_name: String,
    pub leader: Option<PlayerId>,
    pub margin: u32,
    pub holes_remaining: u32,
    pub urgency: Urgency,
    pub summary: String,
}

/// Derive the live context from a nassau standing. `None` when the nassau
/// does not apply to this round.
pub fn nassau_context(result: &NassauResult, players: &[Player]) -> Option<NassauContext> {
    let next_hole = result.thru.map_or(1, |thru| thru.saturating_add(1));
    let segment = Segment::containing(next_hole.min(result.hole_count.max(1)));
    let standing = result.segment(segment)?;

    let holes_remaining = standing.holes_remaining();
    let leader = standing.leader;
    let margin = standing.margin;
    let state = match leader {
        Some(id) => format!("{} leads by {margin}", display_name(players, id)),
        None => "All square".to_string(),
    };
    let summary = match holes_remaining {
        0 => format!("{}: {state}, final", standing.label),
        1 => format!("{}: {state}, 1 hole to play", standing.label),
        n => format!("{}: {state}, {n} holes to play", standing.label),
    };

    Some(NassauContext {
        segment,
        segment_name: standing.label.clone(),
        leader,
        margin,
        holes_remaining,
        urgency: Urgency::classify(margin, holes_remaining),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate_nassau;
    use crate::tests::{config, two_rows};
    use fairway_core::round::RoundView;
    use fairway_core::strokes::StrokeAllocation;
    use fairway_core::test_helpers::{make_players, nine_hole_course};

    fn context_for(a: &[u8], b: &[u8]) -> Option<NassauContext> {
        let players = make_players(2);
        let strokes = StrokeAllocation::new();
        let scores = two_rows(a, b);
        let round = RoundView::new(&players, &scores, &[], &strokes);
        let result = calculate_nassau(&round, &config(Vec::new(), false));
        nassau_context(&result, &players)
    }

    #[test]
    fn early_lead_is_normal() {
        let ctx = context_for(&[4, 4], &[5, 4]).unwrap();
        assert_eq!(ctx.segment, Segment::Front);
        assert_eq!(ctx.segment_name, "Front 9");
        assert_eq!(ctx.leader, Some(1));
        assert_eq!(ctx.margin, 1);
        assert_eq!(ctx.holes_remaining, 7);
        assert_eq!(ctx.urgency, Urgency::Normal);
        assert_eq!(ctx.summary, "Front 9: Player1 leads by 1, 7 holes to play");
    }

    #[test]
    fn two_stroke_gap_is_an_opportunity() {
        let ctx = context_for(&[4, 4, 4], &[5, 5, 4]).unwrap();
        assert_eq!(ctx.urgency, Urgency::Opportunity);
    }

    #[test]
    fn close_finish_on_the_front_is_critical() {
        let ctx = context_for(&[4; 7], &[4; 7]).unwrap();
        assert_eq!(ctx.holes_remaining, 2);
        assert_eq!(ctx.leader, None);
        assert_eq!(ctx.urgency, Urgency::Critical);
        assert_eq!(ctx.summary, "Front 9: All square, 2 holes to play");
    }

    #[test]
    fn turn_moves_to_the_back_nine() {
        let ctx = context_for(&[4; 9], &[5; 9]).unwrap();
        assert_eq!(ctx.segment, Segment::Back);
        assert_eq!(ctx.margin, 0);
        assert_eq!(ctx.holes_remaining, 9);
    }

    #[test]
    fn finished_nine_hole_round_stays_on_front() {
        let players = make_players(2);
        let strokes = StrokeAllocation::new();
        let holes = nine_hole_course();
        let scores = two_rows(&[4; 9], &[5; 9]);
        let round = RoundView::new(&players, &scores, &holes, &strokes);
        let result = calculate_nassau(&round, &config(Vec::new(), false));
        let ctx = nassau_context(&result, &players).unwrap();
        assert_eq!(ctx.segment, Segment::Front);
        assert_eq!(ctx.holes_remaining, 0);
        assert!(ctx.summary.ends_with("final"));
    }

    #[test]
    fn no_context_without_a_match() {
        let players = make_players(3);
        let strokes = StrokeAllocation::new();
        let round = RoundView::new(&players, &[], &[], &strokes);
        let result = calculate_nassau(&round, &config(Vec::new(), false));
        assert_eq!(nassau_context(&result, &players), None);
    }
}
