pub mod keys;
pub mod matcher;
pub mod numeric;
pub mod predicates;
pub mod search;

pub use matcher::SchemeMatcher;
pub use search::{EligibilitySearch, SaveTarget, SearchOutcome};
