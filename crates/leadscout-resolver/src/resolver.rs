//! The business resolver: tries each search variant against the place-lookup
//! provider until a candidate passes validation.
//!
//! Variants are attempted strictly in order and resolution stops at the first
//! accepted candidate. Provider errors are recorded per variant and do not
//! abort the resolution; only when every attempt failed that way is the
//! outcome reported as [`ResolveError::CollaboratorUnavailable`].

use leadscout_core::{CandidateRecord, ResolvedBusiness};
use leadscout_places::{PlaceLookup, PlacesError};
use serde::Serialize;

use crate::category::{category_match, detect_category, Category};
use crate::error::ResolveError;
use crate::matcher::names_match;
use crate::query::{normalize_query, NormalizedQuery};

/// Outcome of one search variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Accepted { candidate: String },
    /// Candidates came back but none passed validation.
    Rejected { near_misses: Vec<String> },
    NoCandidates,
    /// Every search for this variant failed at the provider.
    Unavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantAttempt {
    pub variant: String,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// A successful resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub business: ResolvedBusiness,
    pub query: NormalizedQuery,
    pub attempts: Vec<VariantAttempt>,
}

pub struct BusinessResolver<'a> {
    lookup: &'a dyn PlaceLookup,
}

#[derive(Clone, Copy)]
enum Search {
    Primary,
    Broad,
}

impl<'a> BusinessResolver<'a> {
    #[must_use]
    pub fn new(lookup: &'a dyn PlaceLookup) -> Self {
        Self { lookup }
    }

    /// Resolves a free-text query or maps URL into one validated business.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::EmptyQuery`] if `input` is blank.
    /// - [`ResolveError::CollaboratorUnavailable`] if every attempt failed
    ///   because the provider errored.
    /// - [`ResolveError::NotFound`] if no variant produced an accepted
    ///   candidate.
    pub async fn resolve(&self, input: &str) -> Result<Resolution, ResolveError> {
        let query = normalize_query(input);
        if query.variants.is_empty() && query.place_identifier.is_none() {
            return Err(ResolveError::EmptyQuery);
        }

        let mut attempts = Vec::with_capacity(query.variants.len() + 1);
        let mut last_error: Option<PlacesError> = None;

        if let Some(identifier) = query.place_identifier.clone() {
            let variant = format!("place:{identifier}");
            match self.lookup.get_details(&identifier).await {
                Ok(Some(record)) => {
                    attempts.push(VariantAttempt {
                        variant: variant.clone(),
                        outcome: AttemptOutcome::Accepted {
                            candidate: record.name.clone(),
                        },
                    });
                    return Ok(Self::finish(query, variant, record, attempts));
                }
                Ok(None) => attempts.push(VariantAttempt {
                    variant,
                    outcome: AttemptOutcome::NoCandidates,
                }),
                Err(e) => {
                    tracing::warn!(identifier = %identifier, error = %e, "place details lookup failed");
                    attempts.push(VariantAttempt {
                        variant,
                        outcome: AttemptOutcome::Unavailable {
                            error: e.to_string(),
                        },
                    });
                    last_error = Some(e);
                }
            }
        }

        let mut accepted = None;
        for variant in &query.variants {
            let (outcome, candidate, error) = self.try_variant(&query, variant).await;
            attempts.push(VariantAttempt {
                variant: variant.clone(),
                outcome,
            });
            if let Some(e) = error {
                last_error = Some(e);
            }
            if let Some(record) = candidate {
                accepted = Some((variant.clone(), record));
                break;
            }
        }

        if let Some((variant, record)) = accepted {
            let record = self.enrich(record).await;
            return Ok(Self::finish(query, variant, record, attempts));
        }

        let all_unavailable = attempts
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::Unavailable { .. }));
        if all_unavailable {
            if let Some(last_error) = last_error {
                return Err(ResolveError::CollaboratorUnavailable {
                    query: query.raw,
                    last_error,
                });
            }
        }

        tracing::info!(query = %query.raw, attempts = attempts.len(), "no match found");
        Err(ResolveError::NotFound {
            query: query.raw,
            attempts,
        })
    }

    async fn try_variant(
        &self,
        query: &NormalizedQuery,
        variant: &str,
    ) -> (AttemptOutcome, Option<CandidateRecord>, Option<PlacesError>) {
        let category = detect_category(variant);
        let mut near_misses = Vec::new();
        let mut answered = false;
        let mut last_error = None;

        for search in [Search::Primary, Search::Broad] {
            let result = match search {
                Search::Primary => self.lookup.search_by_text(variant).await,
                Search::Broad => self.lookup.search_broad(variant).await,
            };
            let candidates = match result {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(variant, error = %e, "place search failed, continuing");
                    last_error = Some(e);
                    continue;
                }
            };
            answered = true;

            for candidate in candidates {
                if Self::accepts(&query.match_text, category, &candidate.name) {
                    let outcome = AttemptOutcome::Accepted {
                        candidate: candidate.name.clone(),
                    };
                    return (outcome, Some(candidate), last_error);
                }
                near_misses.push(candidate.name);
            }
        }

        let outcome = if !answered {
            AttemptOutcome::Unavailable {
                error: last_error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            }
        } else if near_misses.is_empty() {
            AttemptOutcome::NoCandidates
        } else {
            tracing::warn!(
                query = %query.match_text,
                variant,
                near_misses = ?near_misses,
                "candidates rejected by name validation"
            );
            AttemptOutcome::Rejected { near_misses }
        };
        (outcome, None, last_error)
    }

    fn accepts(match_text: &str, category: Option<Category>, candidate_name: &str) -> bool {
        if names_match(match_text, candidate_name) {
            return true;
        }
        category.is_some_and(|c| category_match(c, match_text, candidate_name))
    }

    /// Fills in missing rating or review data from the provider's details
    /// endpoint. Lookup failures keep the record as it was.
    async fn enrich(&self, record: CandidateRecord) -> CandidateRecord {
        if record.has_metrics() {
            return record;
        }
        let Some(place_id) = record.place_id.clone() else {
            return record;
        };
        match self.lookup.get_details(&place_id).await {
            Ok(Some(details)) => merge_details(record, details),
            Ok(None) => {
                tracing::debug!(place_id = %place_id, "no details for accepted candidate");
                record
            }
            Err(e) => {
                tracing::warn!(place_id = %place_id, error = %e, "details enrichment failed");
                record
            }
        }
    }

    fn finish(
        query: NormalizedQuery,
        matched_variant: String,
        record: CandidateRecord,
        attempts: Vec<VariantAttempt>,
    ) -> Resolution {
        let incomplete_data = record.is_incomplete();
        if incomplete_data {
            tracing::warn!(
                query = %query.raw,
                name = %record.name,
                "resolved business is missing rating or review data"
            );
        } else {
            tracing::info!(
                query = %query.raw,
                variant = %matched_variant,
                name = %record.name,
                "business resolved"
            );
        }
        Resolution {
            business: ResolvedBusiness {
                query: query.raw.clone(),
                matched_variant,
                record,
                incomplete_data,
            },
            query,
            attempts,
        }
    }
}

/// The validated name is kept; everything else prefers the details record.
fn merge_details(base: CandidateRecord, details: CandidateRecord) -> CandidateRecord {
    CandidateRecord {
        place_id: details.place_id.or(base.place_id),
        name: base.name,
        formatted_address: if details.formatted_address.is_empty() {
            base.formatted_address
        } else {
            details.formatted_address
        },
        rating: details.rating.or(base.rating),
        review_count: details.review_count.or(base.review_count),
        location: details.location.or(base.location),
        categories: if details.categories.is_empty() {
            base.categories
        } else {
            details.categories
        },
    }
}
