use async_trait::async_trait;
use leadscout_core::{CandidateRecord, GeoPoint};

use crate::error::PlacesError;

/// The place-lookup collaborator consumed by the resolver and cohort builder.
///
/// Every method returning a list must preserve the provider's ranking order.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Primary search: the provider's best matches for `text`.
    async fn search_by_text(&self, text: &str) -> Result<Vec<CandidateRecord>, PlacesError>;

    /// Secondary, broader search tried when the primary search yields no
    /// usable candidate. Providers without one return an empty list.
    async fn search_broad(&self, _text: &str) -> Result<Vec<CandidateRecord>, PlacesError> {
        Ok(Vec::new())
    }

    /// Full record for a provider identifier, or `None` if the provider
    /// does not know it.
    async fn get_details(&self, identifier: &str) -> Result<Option<CandidateRecord>, PlacesError>;

    /// Places within `radius_meters` of `center` matching `category_hint`.
    async fn search_nearby(
        &self,
        center: GeoPoint,
        category_hint: &str,
        radius_meters: u32,
    ) -> Result<Vec<CandidateRecord>, PlacesError>;
}
