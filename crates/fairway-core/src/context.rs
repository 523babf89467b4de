use serde::{Deserialize, Serialize};

/// Holes left at which a close contest is flagged as critical.
pub const CLOSING_STRETCH: u32 = 3;

/// Deficit at which the trailing side is worth prompting (press, comeback).
pub const OPPORTUNITY_MARGIN: u32 = 2;

/// How urgently a live standing should be surfaced to the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Late in the segment and still up for grabs.
    Critical,
    /// Someone is far enough behind to act.
    Opportunity,
    Normal,
}

impl Urgency {
    /// Classify a two-sided standing from its margin and the holes left.
    pub fn classify(margin: u32, holes_remaining: u32) -> Self {
        if holes_remaining == 0 {
            Self::Normal
        } else if holes_remaining <= CLOSING_STRETCH && margin <= holes_remaining {
            Self::Critical
        } else if margin >= OPPORTUNITY_MARGIN {
            Self::Opportunity
        } else {
            Self::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Opportunity => "opportunity",
            Self::Normal => "normal",
        }
    }
}
