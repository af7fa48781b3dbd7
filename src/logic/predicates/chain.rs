use super::{
    boolean::BooleanPredicate,
    comparison::ComparisonPredicate,
    header_bound::{LowerBoundHeaderPredicate, UpperBoundHeaderPredicate},
    membership::MembershipPredicate,
    numeric_equality::NumericEqualityPredicate,
    passthrough::{EmptyCellPredicate, MissingAnswerPredicate, WildcardPredicate},
    range::RangePredicate,
    text::{exact_match, ExactMatchPredicate, SubstringPredicate},
    CellContext, CellPredicate,
};
use crate::models::{PredicateKind, RawValue, Verdict};

/// Ordered predicate detectors; the first one that applies decides the cell.
///
/// Order matters: earlier detectors shadow later, more general ones (a
/// `10-50` cell would otherwise fall through to substring matching).
pub struct PredicateChain {
    predicates: Vec<Box<dyn CellPredicate>>,
}

impl PredicateChain {
    pub fn new() -> Self {
        Self::with_predicates(vec![
            Box::new(EmptyCellPredicate),
            Box::new(WildcardPredicate),
            Box::new(MissingAnswerPredicate),
            Box::new(RangePredicate),
            Box::new(ComparisonPredicate),
            Box::new(UpperBoundHeaderPredicate),
            Box::new(LowerBoundHeaderPredicate),
            Box::new(NumericEqualityPredicate),
            Box::new(MembershipPredicate),
            Box::new(BooleanPredicate),
            Box::new(SubstringPredicate),
            Box::new(ExactMatchPredicate),
        ])
    }

    /// The standard chain minus the column-label bound detectors.
    pub fn without_header_heuristics() -> Self {
        let mut chain = Self::new();
        chain.predicates.retain(|p| {
            !matches!(
                p.kind(),
                PredicateKind::UpperBound | PredicateKind::LowerBound
            )
        });
        chain
    }

    pub fn with_predicates(predicates: Vec<Box<dyn CellPredicate>>) -> Self {
        Self { predicates }
    }

    pub fn evaluate(&self, cell: &RawValue, answer: &RawValue, header: &str) -> Verdict {
        let ctx = CellContext::new(cell, answer, header);
        self.predicates
            .iter()
            .find_map(|p| p.evaluate(&ctx).map(|passed| Verdict::new(p.kind(), passed)))
            .unwrap_or_else(|| Verdict::new(PredicateKind::ExactMatch, exact_match(&ctx)))
    }

    pub fn kinds(&self) -> Vec<PredicateKind> {
        self.predicates.iter().map(|p| p.kind()).collect()
    }
}

impl Default for PredicateChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static DEFAULT_CHAIN: LazyLock<PredicateChain> = LazyLock::new(PredicateChain::new);

    fn match_cell(cell: &RawValue, answer: &RawValue, header: &str) -> bool {
        DEFAULT_CHAIN.evaluate(cell, answer, header).passed
    }

    fn text(s: &str) -> RawValue {
        RawValue::from(s)
    }

    fn kind_of(cell: &str, answer: &str, header: &str) -> PredicateKind {
        PredicateChain::new()
            .evaluate(&text(cell), &text(answer), header)
            .kind
    }

    #[test]
    fn empty_cell_passes() {
        assert!(match_cell(&text(""), &text("5"), "Land Size"));
        assert!(match_cell(&RawValue::Null, &text("5"), "Land Size"));
    }

    #[test]
    fn ranges() {
        assert!(match_cell(&text("10-50"), &text("25"), "Land Size"));
        assert!(!match_cell(&text("10-50"), &text("5"), "Land Size"));
    }

    #[test]
    fn comparisons() {
        assert!(match_cell(&text("<=5"), &text("3"), "Max Land (acres)"));
        assert!(!match_cell(&text("<=5"), &text("7"), "Max Land (acres)"));
        assert_eq!(kind_of("<=5", "3", "Max Land (acres)"), PredicateKind::Comparison);
    }

    #[test]
    fn membership() {
        assert!(match_cell(&text("bpl,general"), &text("BPL"), "Category"));
    }

    #[test]
    fn booleans() {
        assert!(match_cell(&text("yes"), &text("Yes"), "Irrigated"));
        assert!(!match_cell(&text("yes"), &text("No"), "Irrigated"));
    }

    #[test]
    fn substring_is_symmetric() {
        assert!(match_cell(&text("Karnataka"), &text("karnataka state"), "State"));
        assert!(match_cell(&text("Karnataka state"), &text("Karnataka"), "State"));
    }

    #[test]
    fn exact_fallback() {
        assert!(!match_cell(&text("Kerala"), &text("Goa"), "State"));
        assert_eq!(kind_of("Kerala", "Goa", "State"), PredicateKind::ExactMatch);
    }

    #[test]
    fn wildcard_before_missing_answer() {
        assert_eq!(kind_of("any", "", "State"), PredicateKind::Wildcard);
        assert_eq!(kind_of("-", "x", "State"), PredicateKind::Wildcard);
    }

    #[test]
    fn missing_answer_passes_numeric_constraints() {
        assert!(match_cell(&text("<=2"), &text(""), "Land Size"));
        assert!(match_cell(&text("10-50"), &RawValue::Null, "Land Size"));
        assert_eq!(kind_of("<=2", " ", "Land Size"), PredicateKind::MissingAnswer);
    }

    #[test]
    fn range_shadows_comparison_and_substring() {
        // "5" is a substring of "10-50" but the range decides first
        assert!(!match_cell(&text("10-50"), &text("5"), "Land Size"));
        assert_eq!(kind_of("10-50", "5", "Land Size"), PredicateKind::Range);
    }

    #[test]
    fn malformed_numeric_constraints_fail() {
        assert!(!match_cell(&text("<=two"), &text("1"), "Land Size"));
        assert!(!match_cell(&text("10-50"), &text("lots"), "Land Size"));
    }

    #[test]
    fn header_bounds_decide_plain_numbers() {
        assert!(match_cell(&text("5"), &text("3"), "Max Land (acres)"));
        assert!(!match_cell(&text("5"), &text("7"), "Max Land (acres)"));
        assert!(match_cell(&text("18"), &text("40"), "Minimum Age"));
        assert_eq!(kind_of("5", "3", "Max Land"), PredicateKind::UpperBound);
        assert_eq!(kind_of("18", "40", "Min Age"), PredicateKind::LowerBound);
    }

    #[test]
    fn upper_bound_checked_before_lower_bound() {
        // Both heuristics match this label; the upper bound wins
        assert_eq!(kind_of("5", "3", "Min/Max Land"), PredicateKind::UpperBound);
    }

    #[test]
    fn without_header_heuristics_falls_to_numeric_equality() {
        let chain = PredicateChain::without_header_heuristics();
        let verdict = chain.evaluate(&text("5"), &text("3"), "Max Land (acres)");
        assert_eq!(verdict, Verdict::new(PredicateKind::NumericEquality, false));
        assert!(!chain.kinds().contains(&PredicateKind::UpperBound));
        assert!(!chain.kinds().contains(&PredicateKind::LowerBound));
    }

    #[test]
    fn numeric_equality_before_membership() {
        // "1,200" parses as a number, so it is not read as a two-item list
        assert!(match_cell(&text("1,200"), &text("1200"), "Income"));
        assert_eq!(kind_of("1,200", "1200", "Income"), PredicateKind::NumericEquality);
    }

    #[test]
    fn numbers_as_answers() {
        assert!(match_cell(&text("<=2"), &RawValue::Number(1.0), "Land Size"));
        assert!(match_cell(&text("2"), &RawValue::Number(2.0), "Land Size"));
    }

    #[test]
    fn empty_custom_chain_uses_exact_fallback() {
        let chain = PredicateChain::with_predicates(Vec::new());
        let verdict = chain.evaluate(&text("Goa"), &text("GOA"), "State");
        assert_eq!(verdict, Verdict::new(PredicateKind::ExactMatch, true));
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            PredicateChain::new().kinds(),
            vec![
                PredicateKind::EmptyCell,
                PredicateKind::Wildcard,
                PredicateKind::MissingAnswer,
                PredicateKind::Range,
                PredicateKind::Comparison,
                PredicateKind::UpperBound,
                PredicateKind::LowerBound,
                PredicateKind::NumericEquality,
                PredicateKind::Membership,
                PredicateKind::BooleanEquality,
                PredicateKind::Substring,
                PredicateKind::ExactMatch,
            ]
        );
    }
}
