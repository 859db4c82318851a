pub mod industry;
pub mod location;
pub mod rules;
pub mod validate;

pub use industry::normalize_industry;
pub use location::{canonical_locations, normalize_location};
pub use validate::{is_valid_company, is_valid_industry, is_valid_location};
