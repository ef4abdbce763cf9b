//! Wire types for the Google Places web service.
//!
//! All four endpoints share one envelope shape: a `status` string plus one of
//! `candidates` (find place), `results` (text / nearby search), or `result`
//! (details).

use leadscout_core::{CandidateRecord, GeoPoint};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PlacesEnvelope {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub candidates: Vec<ApiPlace>,
    #[serde(default)]
    pub results: Vec<ApiPlace>,
    #[serde(default)]
    pub result: Option<ApiPlace>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    /// Nearby search returns a short `vicinity` instead of a full address.
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub geometry: Option<ApiGeometry>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiGeometry {
    pub location: Option<ApiLatLng>,
}

#[derive(Debug, Deserialize)]
pub struct ApiLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl ApiPlace {
    /// Converts into a [`CandidateRecord`]; places without a name are dropped.
    #[must_use]
    pub fn into_candidate(self) -> Option<CandidateRecord> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(CandidateRecord {
            place_id: self.place_id,
            name,
            formatted_address: self
                .formatted_address
                .or(self.vicinity)
                .unwrap_or_default(),
            rating: self.rating,
            review_count: self.user_ratings_total,
            location: self
                .geometry
                .and_then(|g| g.location)
                .map(|l| GeoPoint { lat: l.lat, lng: l.lng }),
            categories: self.types,
        })
    }
}
