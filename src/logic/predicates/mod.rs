pub mod boolean;
pub mod chain;
pub mod comparison;
pub mod header_bound;
pub mod membership;
pub mod numeric_equality;
pub mod passthrough;
pub mod range;
pub mod text;

pub use chain::PredicateChain;

use crate::logic::numeric::parse_numeric;
use crate::models::{PredicateKind, RawValue};

/// One inferred cell predicate. Detectors are tried in a fixed order and the
/// first one that applies decides the cell.
pub trait CellPredicate: Send + Sync {
    /// Tag reported in verdicts and explain output
    fn kind(&self) -> PredicateKind;

    /// `None` when the cell's shape is not this predicate's; otherwise the
    /// pass/fail outcome.
    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool>;
}

/// A ruleset cell, the farmer's answer for its column, and the column label.
pub struct CellContext<'a> {
    pub cell: &'a RawValue,
    pub answer: &'a RawValue,
    pub header: &'a str,
    cell_text: String,
    answer_text: String,
}

impl<'a> CellContext<'a> {
    pub fn new(cell: &'a RawValue, answer: &'a RawValue, header: &'a str) -> Self {
        Self {
            cell,
            answer,
            header,
            cell_text: cell.as_text().trim().to_string(),
            answer_text: answer.as_text().trim().to_string(),
        }
    }

    /// Trimmed text of the cell
    pub fn cell_text(&self) -> &str {
        &self.cell_text
    }

    /// Trimmed text of the answer
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    pub fn cell_number(&self) -> Option<f64> {
        parse_numeric(self.cell)
    }

    pub fn answer_number(&self) -> Option<f64> {
        parse_numeric(self.answer)
    }

    /// Both sides as numbers, when both parse.
    pub fn both_numbers(&self) -> Option<(f64, f64)> {
        Some((self.cell_number()?, self.answer_number()?))
    }
}
