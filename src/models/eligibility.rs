use super::scheme::SchemeRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which detector in the predicate chain decided a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    EmptyCell,
    Wildcard,
    MissingAnswer,
    Range,
    Comparison,
    UpperBound,
    LowerBound,
    NumericEquality,
    Membership,
    BooleanEquality,
    Substring,
    ExactMatch,
}

impl PredicateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateKind::EmptyCell => "Empty Cell",
            PredicateKind::Wildcard => "Wildcard",
            PredicateKind::MissingAnswer => "Missing Answer",
            PredicateKind::Range => "Range",
            PredicateKind::Comparison => "Comparison",
            PredicateKind::UpperBound => "Upper Bound (header)",
            PredicateKind::LowerBound => "Lower Bound (header)",
            PredicateKind::NumericEquality => "Numeric Equality",
            PredicateKind::Membership => "Membership List",
            PredicateKind::BooleanEquality => "Boolean Equality",
            PredicateKind::Substring => "Substring",
            PredicateKind::ExactMatch => "Exact Match",
        }
    }

    /// Kinds that pass without comparing anything.
    pub fn is_passthrough(&self) -> bool {
        matches!(
            self,
            PredicateKind::EmptyCell | PredicateKind::Wildcard | PredicateKind::MissingAnswer
        )
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub kind: PredicateKind,
    pub passed: bool,
}

impl Verdict {
    pub fn new(kind: PredicateKind, passed: bool) -> Self {
        Self { kind, passed }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleScheme {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub raw: SchemeRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResultSet {
    pub eligible: Vec<EligibleScheme>,
    pub count: usize,
    pub searched_at: DateTime<Utc>,
}

impl EligibilityResultSet {
    pub fn new(eligible: Vec<EligibleScheme>) -> Self {
        Self {
            count: eligible.len(),
            eligible,
            searched_at: Utc::now(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.eligible.iter().map(|s| s.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellVerdict {
    pub column: String,
    pub cell: String,
    pub answer: String,
    pub verdict: Verdict,
}

/// Trace of how one row was decided. Evaluation stops at the first failing
/// column, so `cells` ends there for ineligible rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowExplanation {
    pub name: String,
    pub eligible: bool,
    pub cells: Vec<CellVerdict>,
}

impl RowExplanation {
    pub fn failing_cell(&self) -> Option<&CellVerdict> {
        self.cells.iter().find(|c| !c.verdict.passed)
    }
}
