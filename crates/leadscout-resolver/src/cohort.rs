//! Competitor cohort assembly.
//!
//! The cohort keeps the provider's ranking order end to end; the entry
//! threshold computed downstream reads the last member as the weakest.

use leadscout_core::{CandidateRecord, CompetitorRecord, GeoPoint, ResolvedBusiness};
use leadscout_places::{PlaceLookup, PlacesError};
use serde::Serialize;

use crate::dictionary::GENERIC_PLACE_TYPES;
use crate::query::NormalizedQuery;
use crate::text::clean_name;

/// How to find competitors for a resolved business.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CohortHint {
    /// Free text such as `"pest control Waco TX"`.
    Text { text: String },
    /// Places of `category` around `center`.
    Nearby {
        center: GeoPoint,
        category: String,
        radius_meters: u32,
    },
}

impl CohortHint {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Derives a hint from the query's category keyword, or failing that from
    /// the first specific provider category of the business. Businesses with
    /// coordinates get a nearby search.
    ///
    /// Returns `None` when no category is known.
    #[must_use]
    pub fn infer(
        query: &NormalizedQuery,
        business: &ResolvedBusiness,
        radius_meters: u32,
    ) -> Option<Self> {
        let category = query.category_keyword().map(str::to_owned).or_else(|| {
            business
                .record
                .categories
                .iter()
                .find(|tag| !GENERIC_PLACE_TYPES.contains(&tag.as_str()))
                .map(|tag| tag.replace('_', " "))
        })?;

        if let Some(center) = business.record.location {
            return Some(Self::Nearby {
                center,
                category,
                radius_meters,
            });
        }
        let text = match query.location.as_deref() {
            Some(location) => format!("{category} {location}"),
            None => category,
        };
        Some(Self::text(text))
    }
}

pub struct CohortBuilder<'a> {
    lookup: &'a dyn PlaceLookup,
    cohort_size: usize,
}

impl<'a> CohortBuilder<'a> {
    #[must_use]
    pub fn new(lookup: &'a dyn PlaceLookup, cohort_size: usize) -> Self {
        Self {
            lookup,
            cohort_size,
        }
    }

    /// Gathers up to `cohort_size` competitors of `business`, in provider order.
    ///
    /// The business itself and records lacking rating or review count are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`PlacesError`] if the search fails.
    pub async fn build_cohort(
        &self,
        hint: &CohortHint,
        business: &ResolvedBusiness,
    ) -> Result<Vec<CompetitorRecord>, PlacesError> {
        let candidates = match hint {
            CohortHint::Text { text } => {
                let broad = self.lookup.search_broad(text).await?;
                if broad.is_empty() {
                    self.lookup.search_by_text(text).await?
                } else {
                    broad
                }
            }
            CohortHint::Nearby {
                center,
                category,
                radius_meters,
            } => {
                self.lookup
                    .search_nearby(*center, category, *radius_meters)
                    .await?
            }
        };

        let returned = candidates.len();
        let own_name = clean_name(&business.record.name);
        let cohort: Vec<CompetitorRecord> = candidates
            .into_iter()
            .filter(|c| !is_same_business(c, business, &own_name))
            .filter_map(|c| to_competitor(c, business))
            .take(self.cohort_size)
            .collect();

        tracing::debug!(
            business = %business.record.name,
            returned,
            kept = cohort.len(),
            "cohort built"
        );
        Ok(cohort)
    }
}

fn is_same_business(candidate: &CandidateRecord, business: &ResolvedBusiness, own_name: &str) -> bool {
    let same_id = matches!(
        (&candidate.place_id, &business.record.place_id),
        (Some(a), Some(b)) if a == b
    );
    same_id || (!own_name.is_empty() && clean_name(&candidate.name) == own_name)
}

fn to_competitor(candidate: CandidateRecord, business: &ResolvedBusiness) -> Option<CompetitorRecord> {
    let rating = candidate.rating?;
    let review_count = candidate.review_count?;
    let distance_meters = match (business.record.location, candidate.location) {
        (Some(origin), Some(point)) => origin.distance_meters(point),
        _ => 0.0,
    };
    Some(CompetitorRecord {
        name: candidate.name,
        rating,
        review_count,
        distance_meters,
        place_id: candidate.place_id,
        gathered_for: business.record.place_id.clone(),
    })
}
