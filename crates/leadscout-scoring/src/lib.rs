//! Market statistics and lead scoring for resolved businesses.

pub mod scorer;
pub mod stats;

pub use scorer::{assess, assign_tier, score, Assessment, MarketComparison, ScoredLead};
pub use stats::{compute_market_statistics, EntryThreshold, MarketStatistics, Range};
