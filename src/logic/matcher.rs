use super::predicates::PredicateChain;
use crate::config::MatcherConfig;
use crate::models::{
    CellVerdict, Dataset, EligibilityResultSet, EligibleScheme, FarmerInput, RawValue,
    RowExplanation, SchemeRow, Verdict,
};
use regex_lite::Regex;
use std::sync::LazyLock;

static SCHEME_NAME_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)scheme name").expect("scheme name pattern is valid"));

static SCHEME_LINK_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)scheme link").expect("scheme link pattern is valid"));

pub fn is_scheme_name_column(label: &str) -> bool {
    SCHEME_NAME_COLUMN.is_match(label)
}

pub fn is_scheme_link_column(label: &str) -> bool {
    SCHEME_LINK_COLUMN.is_match(label)
}

/// Name and link columns identify a scheme; they are never constraints.
pub fn is_identity_column(label: &str) -> bool {
    is_scheme_name_column(label) || is_scheme_link_column(label)
}

/// Labels of every constraint-bearing column in the dataset, first-seen order.
pub fn rule_columns(dataset: &Dataset) -> Vec<&str> {
    dataset
        .column_labels()
        .into_iter()
        .filter(|label| !is_identity_column(label))
        .collect()
}

fn scheme_name(row: &SchemeRow) -> String {
    row.columns()
        .find(|(label, _)| is_scheme_name_column(label))
        .map(|(_, value)| value.as_text().into_owned())
        .unwrap_or_default()
}

fn scheme_link(row: &SchemeRow) -> Option<String> {
    row.columns()
        .find(|(label, _)| is_scheme_link_column(label))
        .filter(|(_, value)| !value.is_blank())
        .map(|(_, value)| value.as_text().into_owned())
}

/// Evaluates scheme rows against a farmer's answers.
///
/// Holds no per-pass state, so one matcher can serve concurrent passes over
/// the same dataset.
pub struct SchemeMatcher {
    chain: PredicateChain,
}

impl SchemeMatcher {
    pub fn new(chain: PredicateChain) -> Self {
        Self { chain }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        let chain = if config.header_heuristics {
            PredicateChain::new()
        } else {
            PredicateChain::without_header_heuristics()
        };
        tracing::debug!(order = ?chain.kinds(), "Predicate chain");
        Self::new(chain)
    }

    /// Verdicts for the row's constraint cells, in column order. Blank cells
    /// are skipped before the answer is looked up.
    fn verdicts<'r>(
        &'r self,
        row: &'r SchemeRow,
        input: &'r FarmerInput,
    ) -> impl Iterator<Item = (&'r str, &'r RawValue, Verdict)> + 'r {
        row.columns()
            .filter(|(label, cell)| !is_identity_column(label) && !cell.is_blank())
            .map(move |(label, cell)| {
                let answer = input.answer_for(label);
                (label, cell, self.chain.evaluate(cell, answer, label))
            })
    }

    /// `Some` when every constraint cell passes. Stops at the first failure.
    pub fn evaluate_row(&self, row: &SchemeRow, input: &FarmerInput) -> Option<EligibleScheme> {
        if let Some((column, _, verdict)) = self.verdicts(row, input).find(|(_, _, v)| !v.passed)
        {
            tracing::debug!(
                scheme = %scheme_name(row),
                column,
                predicate = %verdict.kind,
                "Scheme rejected"
            );
            return None;
        }

        Some(EligibleScheme {
            name: scheme_name(row),
            link: scheme_link(row),
            raw: row.clone(),
        })
    }

    pub fn explain_row(&self, row: &SchemeRow, input: &FarmerInput) -> RowExplanation {
        let mut cells = Vec::new();
        let mut eligible = true;

        for (column, cell, verdict) in self.verdicts(row, input) {
            cells.push(CellVerdict {
                column: column.to_string(),
                cell: cell.to_string(),
                answer: input.answer_for(column).to_string(),
                verdict,
            });
            if !verdict.passed {
                eligible = false;
                break;
            }
        }

        RowExplanation {
            name: scheme_name(row),
            eligible,
            cells,
        }
    }

    /// Every eligible row, in dataset order.
    pub fn find_eligible(&self, input: &FarmerInput, dataset: &Dataset) -> EligibilityResultSet {
        let eligible: Vec<EligibleScheme> = dataset
            .rows()
            .iter()
            .filter_map(|row| self.evaluate_row(row, input))
            .collect();

        tracing::info!(
            rows = dataset.len(),
            eligible = eligible.len(),
            "Eligibility pass complete"
        );

        EligibilityResultSet::new(eligible)
    }

    pub fn explain(&self, input: &FarmerInput, dataset: &Dataset) -> Vec<RowExplanation> {
        dataset
            .rows()
            .iter()
            .map(|row| self.explain_row(row, input))
            .collect()
    }
}

impl Default for SchemeMatcher {
    fn default() -> Self {
        Self::new(PredicateChain::new())
    }
}
