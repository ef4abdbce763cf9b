//! Name-match validation: decides whether a provider candidate is the
//! business the caller asked for.
//!
//! A false positive here produces a report and an outreach email for the
//! wrong business, so every strategy errs towards rejection. Strategies run in
//! order and the first acceptance wins:
//!
//! 1. exact match on location-filtered or fully-cleaned names,
//! 2. keyword coverage with an establishment-type conflict check,
//! 3. fuzzy similarity at a stringent threshold.

use serde::Serialize;

use crate::dictionary::{establishment_family, ESTABLISHMENT_TYPES};
use crate::text::{clean_name, lowercase_words, significant_tokens, similarity, strip_locations};

/// Similarity needed for the fuzzy fallback to accept.
pub const FUZZY_THRESHOLD: f64 = 0.95;

/// Similarity needed for a substring token pair to count as a partial hit.
pub const PARTIAL_TOKEN_THRESHOLD: f64 = 0.8;

/// Required exact-hit ratio when the query carried location words.
pub const LOCATION_QUERY_RATIO: f64 = 0.6;

/// Required exact-hit ratio for queries without location words.
pub const PLAIN_QUERY_RATIO: f64 = 0.75;

/// Tokens longer than this may score partial hits.
const PARTIAL_MIN_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    Keyword,
    /// Both names carry establishment-type words with nothing in common.
    EstablishmentConflict,
    Fuzzy,
}

/// Outcome of validating one candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchVerdict {
    pub accepted: bool,
    /// The strategy whose evidence decided the verdict. For rejections this
    /// is the last strategy evaluated.
    pub strategy: MatchStrategy,
    /// `1.0` for exact, the exact-hit ratio for keyword, the similarity for
    /// fuzzy.
    pub ratio: f64,
}

/// Keyword-coverage evidence between a query and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHits {
    pub exact: usize,
    pub partial: usize,
    pub total: usize,
}

impl KeywordHits {
    #[must_use]
    pub fn exact_ratio(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.exact as f64 / self.total as f64;
        ratio
    }
}

/// Returns `true` when `candidate_name` denotes the business in `query`.
#[must_use]
pub fn names_match(query: &str, candidate_name: &str) -> bool {
    evaluate_match(query, candidate_name).accepted
}

/// Validates `candidate_name` against `query` and reports the deciding evidence.
#[must_use]
pub fn evaluate_match(query: &str, candidate_name: &str) -> MatchVerdict {
    let query_clean = clean_name(query);
    let candidate_clean = clean_name(candidate_name);
    let query_filtered = strip_locations(&query_clean);
    let candidate_filtered = strip_locations(&candidate_clean);

    let filtered_equal = !query_filtered.is_empty() && query_filtered == candidate_filtered;
    let cleaned_equal = !query_clean.is_empty() && query_clean == candidate_clean;
    if filtered_equal || cleaned_equal {
        return MatchVerdict {
            accepted: true,
            strategy: MatchStrategy::Exact,
            ratio: 1.0,
        };
    }

    let query_basis = if query_filtered.is_empty() {
        &query_clean
    } else {
        &query_filtered
    };
    let candidate_basis = if candidate_filtered.is_empty() {
        &candidate_clean
    } else {
        &candidate_filtered
    };
    let location_present = query_filtered.len() < query_clean.len();

    let hits = keyword_hits(query_basis, candidate_basis);
    let keyword_verdict = if hits.total == 0 {
        None
    } else if hits.total == 1 {
        // A lone query token must also be the candidate's only token.
        let single = hits.exact == 1 && significant_tokens(candidate_basis).len() == 1;
        Some((single, MatchStrategy::Keyword))
    } else if establishment_conflict(query, candidate_name) {
        Some((false, MatchStrategy::EstablishmentConflict))
    } else {
        Some((
            hits.exact >= required_hits(hits.total, location_present),
            MatchStrategy::Keyword,
        ))
    };

    if let Some((true, strategy)) = keyword_verdict {
        return MatchVerdict {
            accepted: true,
            strategy,
            ratio: hits.exact_ratio(),
        };
    }

    tracing::trace!(
        query,
        candidate = candidate_name,
        exact_hits = hits.exact,
        partial_hits = hits.partial,
        total_tokens = hits.total,
        conflict = matches!(
            keyword_verdict,
            Some((_, MatchStrategy::EstablishmentConflict))
        ),
        "keyword match failed, trying fuzzy"
    );

    let score = similarity(&query_clean, &candidate_clean);
    MatchVerdict {
        accepted: !query_clean.is_empty() && score >= FUZZY_THRESHOLD,
        strategy: MatchStrategy::Fuzzy,
        ratio: score,
    }
}

/// Counts query tokens matched exactly or partially by candidate tokens.
#[must_use]
pub fn keyword_hits(query_basis: &str, candidate_basis: &str) -> KeywordHits {
    let query_tokens = significant_tokens(query_basis);
    let candidate_tokens = significant_tokens(candidate_basis);

    let mut hits = KeywordHits {
        exact: 0,
        partial: 0,
        total: query_tokens.len(),
    };

    for token in &query_tokens {
        if candidate_tokens.contains(token) {
            hits.exact += 1;
        } else if token.chars().count() > PARTIAL_MIN_LEN
            && candidate_tokens.iter().any(|c| is_partial_hit(token, c))
        {
            hits.partial += 1;
        }
    }
    hits
}

fn is_partial_hit(query_token: &str, candidate_token: &str) -> bool {
    (candidate_token.contains(query_token) || query_token.contains(candidate_token))
        && similarity(query_token, candidate_token) >= PARTIAL_TOKEN_THRESHOLD
}

/// Minimum exact hits for a multi-token query: `ceil(total × ratio)`.
#[must_use]
pub fn required_hits(total: usize, location_present: bool) -> usize {
    let ratio = if location_present {
        LOCATION_QUERY_RATIO
    } else {
        PLAIN_QUERY_RATIO
    };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let required = (total as f64 * ratio - 1e-9).ceil() as usize;
    required
}

/// `true` when both names carry establishment-type words and no family is
/// shared between them.
#[must_use]
pub fn establishment_conflict(query: &str, candidate_name: &str) -> bool {
    let query_types = establishment_families(query);
    let candidate_types = establishment_families(candidate_name);
    !query_types.is_empty()
        && !candidate_types.is_empty()
        && !query_types.iter().any(|t| candidate_types.contains(t))
}

fn establishment_families(name: &str) -> Vec<String> {
    let words = lowercase_words(name);
    let mut families: Vec<String> = Vec::new();
    for word in words.split(' ') {
        if ESTABLISHMENT_TYPES.contains(&word) {
            let family = establishment_family(word).to_owned();
            if !families.contains(&family) {
                families.push(family);
            }
        }
    }
    families
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
