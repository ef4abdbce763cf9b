//! Lead scoring rules: tier, urgency, gap analysis, and recommendations.
//!
//! Scoring is a pure function of a business's rating, its review count, and
//! its cohort. Nothing here performs I/O or triggers re-resolution.

use leadscout_core::{CompetitorRecord, Lead, ResolvedBusiness, Tier, Urgency};
use serde::Serialize;

use crate::stats::{compute_market_statistics, MarketStatistics};

/// Below this rating a business has a service-quality problem.
pub const QUALITY_RATING: f64 = 4.0;

/// At or above this many reviews a business is already established.
pub const ESTABLISHED_REVIEWS: u32 = 100;

/// Below this many reviews a well-rated business needs visibility.
pub const VISIBILITY_REVIEWS: u32 = 50;

/// First matching rule wins.
#[must_use]
pub fn assign_tier(rating: f64, review_count: u32) -> (Tier, Urgency) {
    if rating < QUALITY_RATING {
        (Tier::C, Urgency::High)
    } else if review_count >= ESTABLISHED_REVIEWS {
        (Tier::C, Urgency::Low)
    } else if review_count < VISIBILITY_REVIEWS {
        (Tier::A, Urgency::High)
    } else {
        (Tier::B, Urgency::Medium)
    }
}

/// A business's position relative to its cohort. Gaps are signed: negative
/// means the business trails the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketComparison {
    pub review_gap_vs_average: f64,
    pub review_gap_vs_median: f64,
    pub rating_gap_vs_average: f64,
    /// Reviews still missing to reach the entry threshold; `0` once met.
    pub reviews_to_entry: u32,
    pub meets_entry_threshold: bool,
}

impl MarketComparison {
    /// `None` for an empty cohort.
    #[must_use]
    pub fn compute(rating: f64, review_count: u32, stats: &MarketStatistics) -> Option<Self> {
        if stats.is_empty() {
            return None;
        }
        let reviews = f64::from(review_count);
        let threshold = stats.entry_threshold;
        Some(Self {
            review_gap_vs_average: reviews - stats.average_reviews,
            review_gap_vs_median: reviews - stats.median_reviews,
            rating_gap_vs_average: rating - stats.average_rating,
            reviews_to_entry: threshold.reviews_needed.saturating_sub(review_count),
            meets_entry_threshold: review_count >= threshold.reviews_needed
                && rating >= threshold.rating_needed,
        })
    }
}

/// Everything the scoring rules derive from metrics and a cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub tier: Tier,
    pub urgency: Urgency,
    pub gap_analysis: String,
    pub recommendations: Vec<String>,
    pub market: Option<MarketComparison>,
    pub statistics: MarketStatistics,
}

/// Applies the scoring rules to raw metrics.
#[must_use]
pub fn assess(rating: f64, review_count: u32, cohort: &[CompetitorRecord]) -> Assessment {
    let statistics = compute_market_statistics(cohort);
    let (tier, urgency) = assign_tier(rating, review_count);
    let market = MarketComparison::compute(rating, review_count, &statistics);
    Assessment {
        tier,
        urgency,
        gap_analysis: gap_analysis(rating, review_count, market.as_ref(), &statistics),
        recommendations: recommendations(tier, urgency, market.as_ref()),
        market,
        statistics,
    }
}

/// A resolved business with its scoring outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredLead {
    pub lead: Lead,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
    pub market: Option<MarketComparison>,
    pub statistics: MarketStatistics,
    /// Set when rating or review data was missing and scored as zero.
    pub needs_manual_review: bool,
}

/// Scores a resolved business against its cohort.
///
/// Missing metrics are scored as zero and flag the lead for manual review.
#[must_use]
pub fn score(business: &ResolvedBusiness, cohort: &[CompetitorRecord]) -> ScoredLead {
    let rating = business.record.rating.unwrap_or(0.0);
    let review_count = business.record.review_count.unwrap_or(0);
    let needs_manual_review = business.incomplete_data || business.record.is_incomplete();

    let mut assessment = assess(rating, review_count, cohort);
    if needs_manual_review {
        assessment
            .recommendations
            .insert(0, "Verify rating and review count manually before outreach".to_owned());
    }

    tracing::debug!(
        name = %business.record.name,
        tier = %assessment.tier,
        urgency = %assessment.urgency,
        competitors = assessment.statistics.competitor_count,
        needs_manual_review,
        "lead scored"
    );

    ScoredLead {
        lead: Lead::new(business, assessment.tier, assessment.gap_analysis),
        urgency: assessment.urgency,
        recommendations: assessment.recommendations,
        market: assessment.market,
        statistics: assessment.statistics,
        needs_manual_review,
    }
}

fn gap_analysis(
    rating: f64,
    review_count: u32,
    market: Option<&MarketComparison>,
    stats: &MarketStatistics,
) -> String {
    let mut text = format!("Rated {rating:.1} with {review_count} reviews.");
    let Some(market) = market else {
        text.push_str(" No competitor cohort available for comparison.");
        return text;
    };

    #[allow(clippy::cast_possible_truncation)]
    let gap = market.review_gap_vs_average.round() as i64;
    text.push_str(&format!(
        " Review gap vs. {} competitors: {gap:+} against an average of {:.1} (median {:.1}, average rating {:.1}).",
        stats.competitor_count, stats.average_reviews, stats.median_reviews, stats.average_rating,
    ));
    if market.meets_entry_threshold {
        text.push_str(" Already meets the market entry threshold.");
    } else {
        text.push_str(&format!(
            " Entry threshold: {} reviews at {:.1} stars.",
            stats.entry_threshold.reviews_needed, stats.entry_threshold.rating_needed,
        ));
    }
    text
}

fn recommendations(tier: Tier, urgency: Urgency, market: Option<&MarketComparison>) -> Vec<String> {
    let mut out: Vec<String> = match (tier, urgency) {
        (Tier::C, Urgency::High) => vec![
            "Address service quality before investing in review acquisition".to_owned(),
            "Respond publicly to recent negative reviews".to_owned(),
        ],
        (Tier::C, _) => vec![
            "Established review base; focus on retention rather than acquisition".to_owned(),
        ],
        (Tier::A, _) => vec![
            "Launch a review-acquisition campaign to convert service quality into visibility"
                .to_owned(),
        ],
        (Tier::B, _) => vec!["Sustain steady review growth to pull ahead locally".to_owned()],
    };

    if tier == Tier::C {
        return out;
    }
    if let Some(market) = market {
        if market.reviews_to_entry > 0 {
            out.push(format!(
                "Gather {} more reviews to reach the local entry threshold",
                market.reviews_to_entry
            ));
        }
        if market.rating_gap_vs_average < 0.0 {
            out.push("Lift the average rating to match local competitors".to_owned());
        }
    }
    out
}
