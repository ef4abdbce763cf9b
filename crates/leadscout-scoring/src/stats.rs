//! Descriptive statistics over a competitor cohort.

use leadscout_core::CompetitorRecord;
use serde::Serialize;

/// Floor for the rating a newcomer needs to compete, whatever the cohort.
pub const MIN_ENTRY_RATING: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

/// The review count and rating estimated to rank among the cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EntryThreshold {
    pub reviews_needed: u32,
    pub rating_needed: f64,
}

/// Summary of one cohort. All fields are zero for an empty cohort.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketStatistics {
    pub competitor_count: usize,
    pub average_rating: f64,
    pub average_reviews: f64,
    pub median_reviews: f64,
    pub review_range: Range<u32>,
    pub rating_range: Range<f64>,
    pub top_performer: Option<CompetitorRecord>,
    pub entry_threshold: EntryThreshold,
}

impl MarketStatistics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitor_count == 0
    }
}

/// Computes statistics for `cohort`, which must be in provider rank order.
#[must_use]
pub fn compute_market_statistics(cohort: &[CompetitorRecord]) -> MarketStatistics {
    let Some(last) = cohort.last() else {
        return MarketStatistics::default();
    };

    #[allow(clippy::cast_precision_loss)]
    let count = cohort.len() as f64;
    let average_rating = cohort.iter().map(|c| c.rating).sum::<f64>() / count;
    let average_reviews = cohort.iter().map(|c| f64::from(c.review_count)).sum::<f64>() / count;

    let review_range = Range {
        min: cohort.iter().map(|c| c.review_count).min().unwrap_or(0),
        max: cohort.iter().map(|c| c.review_count).max().unwrap_or(0),
    };
    let rating_range = Range {
        min: cohort.iter().map(|c| c.rating).fold(f64::INFINITY, f64::min),
        max: cohort.iter().map(|c| c.rating).fold(f64::NEG_INFINITY, f64::max),
    };

    let reviews_needed = last.review_count.saturating_add(1);

    MarketStatistics {
        competitor_count: cohort.len(),
        average_rating,
        average_reviews,
        median_reviews: median(cohort.iter().map(|c| c.review_count).collect()),
        review_range,
        rating_range,
        top_performer: top_performer(cohort).cloned(),
        entry_threshold: EntryThreshold {
            reviews_needed,
            rating_needed: rating_range.min.max(MIN_ENTRY_RATING),
        },
    }
}

fn median(mut values: Vec<u32>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (f64::from(values[mid - 1]) + f64::from(values[mid])) / 2.0
    } else {
        f64::from(values[mid])
    }
}

/// Highest rating, then most reviews; the earliest record wins full ties.
fn top_performer(cohort: &[CompetitorRecord]) -> Option<&CompetitorRecord> {
    let mut best: Option<&CompetitorRecord> = None;
    for record in cohort {
        let better = best.is_none_or(|b| {
            record.rating > b.rating
                || (record.rating == b.rating && record.review_count > b.review_count)
        });
        if better {
            best = Some(record);
        }
    }
    best
}
