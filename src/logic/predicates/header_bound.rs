//! Bounds inferred from the column label rather than the cell.
//!
//! A plain number under a header such as "Max Land (acres)" is read as an
//! upper limit, and under "Minimum Age" as a lower limit. The label is
//! matched on English substrings, which is fragile, so both detectors can be
//! left out of the chain (see `PredicateChain::without_header_heuristics`).

use super::{CellContext, CellPredicate};
use crate::models::PredicateKind;
use regex_lite::Regex;
use std::sync::LazyLock;

static UPPER_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)max|upper|<=").expect("upper header pattern is valid"));

static LOWER_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)min|lower|>=").expect("lower header pattern is valid"));

pub struct UpperBoundHeaderPredicate;

impl CellPredicate for UpperBoundHeaderPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::UpperBound
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        if !UPPER_HEADER.is_match(ctx.header) {
            return None;
        }
        let (limit, answer) = ctx.both_numbers()?;
        Some(answer <= limit)
    }
}

pub struct LowerBoundHeaderPredicate;

impl CellPredicate for LowerBoundHeaderPredicate {
    fn kind(&self) -> PredicateKind {
        PredicateKind::LowerBound
    }

    fn evaluate(&self, ctx: &CellContext<'_>) -> Option<bool> {
        if !LOWER_HEADER.is_match(ctx.header) {
            return None;
        }
        let (limit, answer) = ctx.both_numbers()?;
        Some(answer >= limit)
    }
}
