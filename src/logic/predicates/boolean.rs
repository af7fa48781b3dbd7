use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;
use regex_lite::Regex;
use std::sync::LazyLock;

static BOOLEAN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(yes|no|true|false)$").expect("boolean pattern is valid"));

/// yes/no/true/false on both sides, compared as words. `yes` and `true` are
/// not treated as the same answer.
pub struct BooleanPredicate;

impl CellPredicate for BooleanPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::BooleanEquality
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let cell = ctx.cell_text();
        let answer = ctx.answer_text();
        if !BOOLEAN_WORD.is_match(cell) || !BOOLEAN_WORD.is_match(answer) {
            return None;
        }
        Some(cell.eq_ignore_ascii_case(answer))
    }
}
