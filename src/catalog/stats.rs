//! Column statistics over exact decimal values.

use bigdecimal::BigDecimal;

use super::types::ColumnStats;

/// Compute the median of a set of decimal values.
///
/// The input does not have to be sorted and is left untouched; sorting
/// happens on an owned copy. Even-length inputs average the two middle
/// values exactly. Returns `None` for an empty input.
pub fn median(values: &[BigDecimal]) -> Option<BigDecimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let len = sorted.len();
    let mid = len / 2;
    if len % 2 == 0 {
        Some(midpoint(&sorted[mid - 1], &sorted[mid]))
    } else {
        Some(sorted[mid].clone())
    }
}

/// Exact midpoint of two decimals. Halving adds at most one digit of scale.
fn midpoint(lower: &BigDecimal, upper: &BigDecimal) -> BigDecimal {
    (lower + upper).half()
}

impl ColumnStats {
    /// Compute min, max, and median over the non-NULL values.
    ///
    /// Returns `None` when there is no non-NULL value to describe.
    pub fn compute(values: &[Option<BigDecimal>]) -> Option<Self> {
        let present: Vec<BigDecimal> = values.iter().flatten().cloned().collect();

        let min = present.iter().min().cloned()?;
        let max = present.iter().max().cloned()?;
        let median = median(&present)?;

        Some(Self { min, max, median })
    }
}
