use leadscout_places::PlacesError;
use thiserror::Error;

use crate::resolver::VariantAttempt;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every variant was tried and no candidate was accepted.
    #[error("no match for '{query}' after {} variant attempts", .attempts.len())]
    NotFound {
        query: String,
        attempts: Vec<VariantAttempt>,
    },

    /// Every variant failed because the place-lookup provider errored.
    #[error("place lookup unavailable while resolving '{query}': {last_error}")]
    CollaboratorUnavailable {
        query: String,
        #[source]
        last_error: PlacesError,
    },

    #[error("query is empty")]
    EmptyQuery,
}
