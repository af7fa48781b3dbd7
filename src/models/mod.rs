pub mod eligibility;
pub mod farmer_input;
pub mod profile;
pub mod scheme;
pub mod value;

pub use eligibility::*;
pub use farmer_input::*;
pub use profile::*;
pub use scheme::*;
pub use value::*;
