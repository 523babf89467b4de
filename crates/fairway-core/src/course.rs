use serde::{Deserialize, Serialize};

/// Par assumed for any hole the course data does not cover.
pub const DEFAULT_PAR: u8 = 4;

/// Holes in a regulation round when no course data is supplied.
pub const REGULATION_HOLES: u8 = 18;

/// Course data for a single hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleInfo {
    /// 1-based hole number.
    pub number: u8,
    pub par: u8,
    /// Stroke index: 1 is the hardest hole on the card.
    pub difficulty_rank: u8,
    pub distance_yards: u16,
}

impl HoleInfo {
    pub fn new(number: u8, par: u8) -> Self {
        Self {
            number,
            par,
            difficulty_rank: number,
            distance_yards: 0,
        }
    }
}

/// Par for `hole`, defaulting to [`DEFAULT_PAR`] when the hole is unknown.
pub fn par_for(holes: &[HoleInfo], hole: u8) -> u8 {
    holes
        .iter()
        .find(|h| h.number == hole)
        .map(|h| h.par)
        .unwrap_or(DEFAULT_PAR)
}

/// Number of holes in the round described by `holes`.
pub fn hole_count(holes: &[HoleInfo]) -> u8 {
    let highest = holes.iter().map(|h| h.number).max().unwrap_or(0);
    if highest == 0 {
        REGULATION_HOLES
    } else {
        highest.max(holes.len().min(u8::MAX as usize) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hole_defaults_to_par_four() {
        let holes = vec![HoleInfo::new(1, 3), HoleInfo::new(2, 5)];
        assert_eq!(par_for(&holes, 1), 3);
        assert_eq!(par_for(&holes, 2), 5);
        assert_eq!(par_for(&holes, 7), DEFAULT_PAR);
        assert_eq!(par_for(&[], 1), DEFAULT_PAR);
    }

    #[test]
    fn hole_count_uses_course_data_or_regulation() {
        assert_eq!(hole_count(&[]), 18);
        let nine: Vec<HoleInfo> = (1..=9).map(|n| HoleInfo::new(n, 4)).collect();
        assert_eq!(hole_count(&nine), 9);
    }
}
