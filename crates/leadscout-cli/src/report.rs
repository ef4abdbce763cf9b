//! Single-query pipeline: resolve, gather the cohort, score.

use leadscout_core::{AppConfig, CompetitorRecord};
use leadscout_places::PlaceLookup;
use leadscout_resolver::{
    BusinessResolver, CohortBuilder, CohortHint, ResolveError, VariantAttempt,
};
use leadscout_scoring::ScoredLead;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub(crate) struct CohortSettings {
    pub cohort_size: usize,
    pub radius_meters: u32,
}

impl CohortSettings {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self {
            cohort_size: config.cohort_size,
            radius_meters: config.nearby_radius_meters,
        }
    }
}

/// Output of one successfully resolved query.
#[derive(Debug, Serialize)]
pub(crate) struct LeadReport {
    pub scored: ScoredLead,
    pub cohort_hint: Option<CohortHint>,
    pub competitors: Vec<CompetitorRecord>,
    pub attempts: Vec<VariantAttempt>,
}

/// Resolves `query`, gathers its competitors, and scores it.
///
/// A failed cohort search is logged and scored against an empty cohort; only
/// resolution failures are returned.
pub(crate) async fn resolve_and_score(
    lookup: &dyn PlaceLookup,
    settings: CohortSettings,
    query: &str,
    cohort: Option<&str>,
    nearby: bool,
) -> Result<LeadReport, ResolveError> {
    let resolution = BusinessResolver::new(lookup).resolve(query).await?;
    let business = &resolution.business;

    let hint = match cohort {
        Some(text) => match business.record.location {
            Some(center) if nearby => Some(CohortHint::Nearby {
                center,
                category: text.to_owned(),
                radius_meters: settings.radius_meters,
            }),
            _ => Some(CohortHint::text(text)),
        },
        None => CohortHint::infer(&resolution.query, business, settings.radius_meters),
    };

    let competitors = match &hint {
        Some(hint) => CohortBuilder::new(lookup, settings.cohort_size)
            .build_cohort(hint, business)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(query, error = %e, "cohort search failed, scoring without competitors");
                Vec::new()
            }),
        None => {
            tracing::warn!(query, "no category known for cohort search");
            Vec::new()
        }
    };

    let scored = leadscout_scoring::score(business, &competitors);
    tracing::info!(
        query,
        name = %scored.lead.name,
        tier = %scored.lead.tier,
        competitors = competitors.len(),
        "lead scored"
    );

    Ok(LeadReport {
        scored,
        cohort_hint: hint,
        competitors,
        attempts: resolution.attempts,
    })
}
