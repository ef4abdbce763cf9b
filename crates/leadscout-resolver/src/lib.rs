//! Business identity resolution: query normalization, name validation, and
//! competitor cohort assembly on top of a [`leadscout_places::PlaceLookup`].

pub mod category;
pub mod cohort;
mod dictionary;
pub mod error;
pub mod matcher;
pub mod query;
pub mod resolver;
pub mod text;
pub mod url;

pub use category::{category_match, detect_category, Category};
pub use cohort::{CohortBuilder, CohortHint};
pub use error::ResolveError;
pub use matcher::{evaluate_match, names_match, MatchStrategy, MatchVerdict};
pub use query::{normalize_query, NormalizedQuery};
pub use resolver::{AttemptOutcome, BusinessResolver, Resolution, VariantAttempt};
pub use text::{clean_name, similarity, strip_locations};
