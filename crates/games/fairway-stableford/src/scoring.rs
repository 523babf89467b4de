use serde::{Deserialize, Serialize};

/// Which stableford points table to score against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StablefordVariant {
    #[default]
    Standard,
    Modified,
}

/// Points for a hole played `relative_to_par` strokes from par.
///
/// Standard: albatross or better 5, eagle 4, birdie 3, par 2, bogey 1, worse 0.
/// Modified: albatross or better 8, eagle 5, birdie 3, par 1, bogey 0,
/// double bogey -1, worse -3.
pub fn points_for(relative_to_par: i32, variant: StablefordVariant) -> i32 {
    match variant {
        StablefordVariant::Standard => match relative_to_par {
            i32::MIN..=-3 => 5,
            -2 => 4,
            -1 => 3,
            0 => 2,
            1 => 1,
            _ => 0,
        },
        StablefordVariant::Modified => match relative_to_par {
            i32::MIN..=-3 => 8,
            -2 => 5,
            -1 => 3,
            0 => 1,
            1 => 0,
            2 => -1,
            _ => -3,
        },
    }
}
