use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;
use regex_lite::Regex;
use std::sync::LazyLock;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)$").expect("range pattern is valid")
});

/// `low-high`, an inclusive numeric interval. Either bound may be negative,
/// so `-5-5` is the interval from -5 to 5.
///
/// An answer that is not a number fails the cell.
pub struct RangePredicate;

impl RangePredicate {
    fn bounds(cell: &str) -> Option<(f64, f64)> {
        let caps = RANGE_PATTERN.captures(cell)?;
        let min = caps.get(1)?.as_str().parse::<f64>().ok()?;
        let max = caps.get(2)?.as_str().parse::<f64>().ok()?;
        Some((min, max))
    }
}

impl CellPredicate for RangePredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Range
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let (min, max) = Self::bounds(ctx.cell_text())?;
        Some(
            ctx.answer_number()
                .is_some_and(|value| value >= min && value <= max),
        )
    }
}
