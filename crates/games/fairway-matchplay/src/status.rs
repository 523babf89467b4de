use serde::{Deserialize, Serialize};

/// Where a two-sided match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotStarted,
    Ongoing,
    /// Leader is up by exactly the holes remaining.
    Dormie,
    Won,
    Halved,
}

impl MatchStatus {
    /// Classify a match. The order of checks matters: a lead larger than the
    /// holes left is a win before it can be dormie, and dormie is checked
    /// before the generic ongoing state.
    pub fn classify(holes_played: u32, holes_up: u32, holes_remaining: u32) -> Self {
        if holes_played == 0 {
            Self::NotStarted
        } else if holes_up > holes_remaining {
            Self::Won
        } else if holes_up == holes_remaining && holes_up > 0 {
            Self::Dormie
        } else if holes_remaining == 0 && holes_up == 0 {
            Self::Halved
        } else {
            Self::Ongoing
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Halved)
    }
}

/// Scoreboard text for a match, e.g. `3&2`, `2 UP`, `Ana 1 UP`, `All Square`.
pub fn margin_text(
    status: MatchStatus,
    holes_up: u32,
    holes_remaining: u32,
    leader_name: Option<&str>,
) -> String {
    match status {
        MatchStatus::NotStarted => "Not Started".to_string(),
        MatchStatus::Won if holes_remaining == 0 => format!("{holes_up} UP"),
        MatchStatus::Won => format!("{holes_up}&{holes_remaining}"),
        MatchStatus::Dormie => match leader_name {
            Some(name) => format!("{name} Dormie {holes_up}"),
            None => format!("Dormie {holes_up}"),
        },
        MatchStatus::Halved => "Halved".to_string(),
        MatchStatus::Ongoing => match leader_name {
            Some(name) if holes_up > 0 => format!("{name} {holes_up} UP"),
            _ => "All Square".to_string(),
        },
    }
}
