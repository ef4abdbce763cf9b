//! Business records shared by the resolver, the scoring engine, and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Great-circle (haversine) distance to `other`, in meters.
    #[must_use]
    pub fn distance_meters(self, other: GeoPoint) -> f64 {
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let delta_phi = (other.lat - self.lat).to_radians();
        let delta_lambda = (other.lng - self.lng).to_radians();
        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// One raw result returned by the place-lookup provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Provider-assigned place identifier, if the provider returned one.
    pub place_id: Option<String>,
    pub name: String,
    pub formatted_address: String,
    /// Star rating in `[0.0, 5.0]`.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub location: Option<GeoPoint>,
    /// Provider category tags (e.g. `"plumber"`, `"restaurant"`).
    #[serde(default)]
    pub categories: Vec<String>,
}

impl CandidateRecord {
    /// `true` when both rating and review count are present.
    #[must_use]
    pub fn has_metrics(&self) -> bool {
        self.rating.is_some() && self.review_count.is_some()
    }

    /// `true` when rating or review count is missing, or both are zero.
    ///
    /// Records in this state need manual correction before scoring is
    /// meaningful.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        match (self.rating, self.review_count) {
            (Some(rating), Some(reviews)) => rating == 0.0 && reviews == 0,
            _ => true,
        }
    }
}

/// A business the resolver accepted as the one the caller asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedBusiness {
    pub query: String,
    /// The search variant that produced the accepted candidate.
    pub matched_variant: String,
    pub record: CandidateRecord,
    pub incomplete_data: bool,
}

/// A competitor gathered for comparison against one resolved business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    /// Distance from the resolved business; `0.0` when unknown.
    pub distance_meters: f64,
    pub place_id: Option<String>,
    /// Place id of the resolved business this cohort was gathered for.
    pub gathered_for: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::High => write!(f, "High"),
            Urgency::Medium => write!(f, "Medium"),
            Urgency::Low => write!(f, "Low"),
        }
    }
}

/// A resolved and scored business.
///
/// Tier and gap analysis are fixed at construction; re-scoring produces a
/// new `Lead`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub place_id: Option<String>,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub tier: Tier,
    pub gap_analysis: String,
    pub location: Option<GeoPoint>,
    pub scored_at: DateTime<Utc>,
}

impl Lead {
    #[must_use]
    pub fn new(business: &ResolvedBusiness, tier: Tier, gap_analysis: String) -> Self {
        let record = &business.record;
        Self {
            id: Uuid::new_v4(),
            place_id: record.place_id.clone(),
            name: record.name.clone(),
            address: record.formatted_address.clone(),
            rating: record.rating,
            review_count: record.review_count,
            tier,
            gap_analysis,
            location: record.location,
            scored_at: Utc::now(),
        }
    }
}
