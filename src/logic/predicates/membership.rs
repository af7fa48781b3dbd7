use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;

/// Comma-separated allowed values, matched case-insensitively.
pub struct MembershipPredicate;

impl CellPredicate for MembershipPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Membership
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let cell = ctx.cell_text();
        if !cell.contains(',') {
            return None;
        }
        let answer = ctx.answer_text().to_lowercase();
        Some(
            cell.split(',')
                .map(|option| option.trim().to_lowercase())
                .any(|option| option == answer),
        )
    }
}
