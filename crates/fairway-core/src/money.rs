use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::game_trait::PlayerId;

/// An amount of money in integer cents.
///
/// Every ledger in the engine is kept in cents so that payouts sum to zero
/// exactly. Conversion to a decimal amount only happens for display.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub const ZERO: Self = Self(0);

    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_whole_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Convert a decimal dollar amount, rounding half away from zero.
    /// Returns `None` for NaN or infinite input.
    pub fn from_dollars(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() {
            return None;
        }
        Some(Self((dollars * 100.0).round() as i64))
    }

    pub fn to_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Split into `parts` shares that always add back up to `self`.
    /// Leftover cents go to the earliest shares.
    pub fn split_evenly(self, parts: usize) -> Vec<Cents> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i64;
        let base = self.0 / n;
        let remainder = self.0 % n;
        (0..n)
            .map(|i| {
                if i < remainder.abs() {
                    Cents(base + remainder.signum())
                } else {
                    Cents(base)
                }
            })
            .collect()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{sign}${}.{:02}", abs / 100, abs % 100))
    }
}

impl Add for Cents {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Cents {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Cents {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Largest stake a game or side bet may carry ($100,000).
///
/// Calculators multiply stakes by player counts, skins and wolf points; this
/// keeps every such product far inside `i64`.
pub const MAX_STAKES: Cents = Cents(10_000_000);

/// Whether `dollars` is a usable stake: finite, non-negative and at most
/// [`MAX_STAKES`].
pub fn is_usable_stake(dollars: f64) -> bool {
    dollars.is_finite() && dollars >= 0.0 && dollars <= MAX_STAKES.to_dollars()
}

/// Turn an externally supplied stake into cents.
///
/// Missing, non-finite, negative and oversized stakes fall back to `default`,
/// itself capped at [`MAX_STAKES`].
pub fn sanitize_stakes(raw: Option<f64>, default: Cents) -> Cents {
    let default = default.min(MAX_STAKES);
    match raw {
        None => default,
        Some(dollars) if is_usable_stake(dollars) => {
            Cents::from_dollars(dollars).unwrap_or(default)
        },
        Some(dollars) => {
            tracing::warn!(stakes = dollars, fallback = %default, "Unusable stakes, using default");
            default
        },
    }
}

/// A single payment from one player to another, before netting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: PlayerId,
    pub to: PlayerId,
    pub amount: Cents,
}

/// Split every loser's deficit among the winners in proportion to each
/// winner's share of total winnings.
///
/// Shares are floored first; the cents left over are then placed one at a
/// time by largest fractional remainder, then loser order, then winner order.
/// For zero-sum input every loser pays exactly its deficit and every winner
/// receives exactly its winnings. Order of `balances` is the tie-break order.
pub fn distribute_proportionally(balances: &[(PlayerId, Cents)]) -> Vec<Transfer> {
    let winners: Vec<(PlayerId, i64)> = balances
        .iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|&(id, amount)| (id, amount.0))
        .collect();
    let losers: Vec<(PlayerId, i64)> = balances
        .iter()
        .filter(|(_, amount)| amount.is_negative())
        .map(|&(id, amount)| (id, -amount.0))
        .collect();

    let total_won: i64 = winners.iter().map(|(_, a)| a).sum();
    let total_lost: i64 = losers.iter().map(|(_, d)| d).sum();
    if total_won == 0 || total_lost == 0 {
        return Vec::new();
    }
    if total_won != total_lost {
        tracing::warn!(total_won, total_lost, "Distributing balances that do not sum to zero");
    }

    // Dividing by the larger side keeps every floored cell within both margins.
    let denominator = i128::from(total_won.max(total_lost));
    let mut grid = vec![vec![0i64; winners.len()]; losers.len()];
    let mut remainders = Vec::with_capacity(losers.len() * winners.len());
    for (i, &(_, deficit)) in losers.iter().enumerate() {
        for (j, &(_, won)) in winners.iter().enumerate() {
            let exact = i128::from(deficit) * i128::from(won);
            grid[i][j] = (exact / denominator) as i64;
            remainders.push((exact % denominator, i, j));
        }
    }
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut still_owed: Vec<i64> = losers
        .iter()
        .zip(&grid)
        .map(|((_, deficit), row)| deficit - row.iter().sum::<i64>())
        .collect();
    let mut still_due: Vec<i64> = winners
        .iter()
        .enumerate()
        .map(|(j, (_, won))| won - grid.iter().map(|row| row[j]).sum::<i64>())
        .collect();

    while still_owed.iter().any(|&r| r > 0) && still_due.iter().any(|&c| c > 0) {
        for &(_, i, j) in &remainders {
            if still_owed[i] > 0 && still_due[j] > 0 {
                grid[i][j] += 1;
                still_owed[i] -= 1;
                still_due[j] -= 1;
            }
        }
    }

    let mut transfers = Vec::new();
    for (i, &(from, _)) in losers.iter().enumerate() {
        for (j, &(to, _)) in winners.iter().enumerate() {
            if grid[i][j] > 0 {
                transfers.push(Transfer {
                    from,
                    to,
                    amount: Cents(grid[i][j]),
                });
            }
        }
    }
    transfers
}
