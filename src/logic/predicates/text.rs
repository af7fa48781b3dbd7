use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;

/// Either side contains the other, ignoring case. "karnataka state" matches
/// a "Karnataka" cell, and "Kar" matches it too.
pub struct SubstringPredicate;

impl CellPredicate for SubstringPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Substring
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let cell = ctx.cell_text().to_lowercase();
        let answer = ctx.answer_text().to_lowercase();
        (answer.contains(&cell) || cell.contains(&answer)).then_some(true)
    }
}

/// Last resort: case-insensitive equality. Always applies.
pub struct ExactMatchPredicate;

impl CellPredicate for ExactMatchPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::ExactMatch
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        Some(exact_match(ctx))
    }
}

pub fn exact_match(ctx: &CellContext<'_>) -> bool {
    ctx.cell_text().to_lowercase() == ctx.answer_text().to_lowercase()
}
