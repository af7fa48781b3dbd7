use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;

/// A blank cell expresses no constraint.
pub struct EmptyCellPredicate;

impl CellPredicate for EmptyCellPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::EmptyCell
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        ctx.cell.is_blank().then_some(true)
    }
}

/// `any` (any case) or `-` accepts every answer.
pub struct WildcardPredicate;

impl CellPredicate for WildcardPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Wildcard
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let cell = ctx.cell_text();
        (cell.eq_ignore_ascii_case("any") || cell == "-").then_some(true)
    }
}

/// A blank answer cannot be tested, so the cell passes.
///
/// This makes the matcher lenient toward skipped questions: a farmer who
/// leaves a field out can be reported eligible for schemes they would fail
/// if they had answered.
pub struct MissingAnswerPredicate;

impl CellPredicate for MissingAnswerPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::MissingAnswer
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        ctx.answer.is_blank().then_some(true)
    }
}
