use super::farmer_input::FarmerInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a profile store hands back after a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProfileSummary {
    pub profile_id: i64,
    pub user_id: String,
    pub profile_name: String,
    pub eligible_count: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmerProfile {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub answers: FarmerInput,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One stored matching pass for a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    pub id: i64,
    pub profile_id: i64,
    pub eligible_count: usize,
    pub scheme_names: Vec<String>,
    pub searched_at: DateTime<Utc>,
}
