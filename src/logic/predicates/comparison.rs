use super::{CellContext, CellPredicate};
use crate::logic::numeric::parse_numeric_str;
use crate::models::PredicateKind;
use regex_lite::Regex;
use std::sync::LazyLock;

static COMPARISON_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<=|>=|<|>)\s*(.*)$").expect("comparison pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    LessOrEqual,
    GreaterOrEqual,
    Less,
    Greater,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<=" => Some(Operator::LessOrEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            "<" => Some(Operator::Less),
            ">" => Some(Operator::Greater),
            _ => None,
        }
    }

    fn apply(self, answer: f64, limit: f64) -> bool {
        match self {
            Operator::LessOrEqual => answer <= limit,
            Operator::GreaterOrEqual => answer >= limit,
            Operator::Less => answer < limit,
            Operator::Greater => answer > limit,
        }
    }
}

/// `<=`, `>=`, `<` or `>` followed by a number, e.g. `<=5` or `> ₹1,00,000`.
///
/// Any cell starting with an operator is claimed here; if either side fails
/// to parse the cell fails.
pub struct ComparisonPredicate;

impl CellPredicate for ComparisonPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::Comparison
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        let caps = COMPARISON_PATTERN.captures(ctx.cell_text())?;
        let op = Operator::from_symbol(caps.get(1)?.as_str())?;
        let limit = caps.get(2).and_then(|m| parse_numeric_str(m.as_str()));

        Some(match (ctx.answer_number(), limit) {
            (Some(answer), Some(limit)) => op.apply(answer, limit),
            _ => false,
        })
    }
}
