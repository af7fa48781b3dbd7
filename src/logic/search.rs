use super::matcher::SchemeMatcher;
use crate::datasources::DatasetSource;
use crate::db::ProfileStore;
use crate::error::Result;
use crate::models::{
    Dataset, EligibilityResultSet, FarmerInput, RowExplanation, SavedProfileSummary,
};
use serde::Serialize;

/// Where to persist a pass, if anywhere.
pub struct SaveTarget<'a> {
    pub store: &'a dyn ProfileStore,
    pub user_id: &'a str,
    pub profile_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: EligibilityResultSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<SavedProfileSummary>,
    /// Set when saving failed; the results are complete regardless.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<RowExplanation>>,
}

pub struct EligibilitySearch {
    matcher: SchemeMatcher,
}

impl EligibilitySearch {
    pub fn new(matcher: SchemeMatcher) -> Self {
        Self { matcher }
    }

    /// Fetch a fresh snapshot for one pass. An absent or malformed source is
    /// an error; an empty one is not.
    pub async fn load(&self, source: &DatasetSource) -> Result<Dataset> {
        let dataset = source.load().await?;
        if dataset.is_empty() {
            tracing::warn!(source = %source.describe(), "Scheme dataset has no rows");
        }
        Ok(dataset)
    }

    /// Match against an already loaded dataset, then hand the results to the
    /// profile store. A failed save is reported as a warning.
    pub fn run(
        &self,
        input: &FarmerInput,
        dataset: &Dataset,
        save: Option<SaveTarget<'_>>,
    ) -> SearchOutcome {
        let results = self.matcher.find_eligible(input, dataset);

        let (saved, warning) = match save {
            None => (None, None),
            Some(target) => {
                match target
                    .store
                    .save_profile(target.user_id, target.profile_name, input, &results)
                {
                    Ok(summary) => {
                        tracing::info!(
                            profile = %summary.profile_name,
                            eligible = summary.eligible_count,
                            "Profile saved"
                        );
                        (Some(summary), None)
                    }
                    Err(e) => {
                        tracing::warn!("Failed to save profile '{}': {}", target.profile_name, e);
                        (None, Some(format!("Results were not saved: {}", e)))
                    }
                }
            }
        };

        SearchOutcome {
            results,
            saved,
            warning,
            explanations: None,
        }
    }

    /// Attach the per-row trace of how this pass decided each scheme.
    pub fn explain(&self, outcome: &mut SearchOutcome, input: &FarmerInput, dataset: &Dataset) {
        outcome.explanations = Some(self.matcher.explain(input, dataset));
    }
}

impl Default for EligibilitySearch {
    fn default() -> Self {
        Self::new(SchemeMatcher::default())
    }
}
