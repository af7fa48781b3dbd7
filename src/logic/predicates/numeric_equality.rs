use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;

/// Cell and answer both numeric: they must be equal.
pub struct NumericEqualityPredicate;

impl CellPredicate for NumericEqualityPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::NumericEquality
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let (cell, answer) = ctx.both_numbers()?;
        Some(cell == answer)
    }
}
