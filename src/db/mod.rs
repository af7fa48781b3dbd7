pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Database;

use crate::error::Result;
use crate::models::{EligibilityResultSet, FarmerInput, SavedProfileSummary};

/// Persists a farmer's answers and the result of a matching pass under a
/// named profile.
pub trait ProfileStore {
    fn save_profile(
        &self,
        user_id: &str,
        profile_name: &str,
        input: &FarmerInput,
        results: &EligibilityResultSet,
    ) -> Result<SavedProfileSummary>;
}
