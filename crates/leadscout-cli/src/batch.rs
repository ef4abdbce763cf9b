//! Batch processing: every query is resolved independently, and one failure
//! never stops its siblings.

use futures::stream::{self, StreamExt};
use leadscout_core::BatchEntry;
use leadscout_places::PlaceLookup;
use leadscout_resolver::{ResolveError, VariantAttempt};
use serde::Serialize;

use crate::report::{resolve_and_score, CohortSettings, LeadReport};

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum BatchOutcome {
    Scored {
        query: String,
        report: Box<LeadReport>,
    },
    NotFound {
        query: String,
        attempts: Vec<VariantAttempt>,
    },
    Unavailable {
        query: String,
        error: String,
    },
    Failed {
        query: String,
        error: String,
    },
}

impl BatchOutcome {
    fn from_result(query: &str, result: Result<LeadReport, ResolveError>) -> Self {
        let query = query.to_owned();
        match result {
            Ok(report) => Self::Scored {
                query,
                report: Box::new(report),
            },
            Err(ResolveError::NotFound { attempts, .. }) => Self::NotFound { query, attempts },
            Err(ResolveError::CollaboratorUnavailable { last_error, .. }) => Self::Unavailable {
                query,
                error: last_error.to_string(),
            },
            Err(e @ ResolveError::EmptyQuery) => Self::Failed {
                query,
                error: e.to_string(),
            },
        }
    }
}

/// Resolves `entries` with at most `max_concurrent` in flight. Outcomes come
/// back in input order.
pub(crate) async fn run_batch(
    lookup: &dyn PlaceLookup,
    settings: CohortSettings,
    entries: &[BatchEntry],
    max_concurrent: usize,
) -> Vec<BatchOutcome> {
    let mut indexed: Vec<(usize, BatchOutcome)> = stream::iter(entries.iter().enumerate())
        .map(|(index, entry)| async move {
            let result =
                resolve_and_score(lookup, settings, &entry.query, entry.cohort.as_deref(), false)
                    .await;
            if let Err(e) = &result {
                tracing::warn!(query = %entry.query, error = %e, "query failed");
            }
            (index, BatchOutcome::from_result(&entry.query, result))
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    indexed.sort_by_key(|(index, _)| *index);

    let scored = indexed
        .iter()
        .filter(|(_, o)| matches!(o, BatchOutcome::Scored { .. }))
        .count();
    tracing::info!(total = entries.len(), scored, "batch complete");

    indexed.into_iter().map(|(_, outcome)| outcome).collect()
}
