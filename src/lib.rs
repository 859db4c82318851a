//! Job listings from a weekly newsletter: parse each edition's lines, filter
//! and normalize the fields, then merge companies across editions.

pub mod config;
pub mod enrich;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod taxonomy;

pub use error::{Field, Reject};
pub use model::{CanonicalCompany, EditionText, RawListing, RoleCategory};
pub use pipeline::{run, BuildOutput, RunStats};
