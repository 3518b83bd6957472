// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod impact;
pub mod matcher;
pub mod pair;
pub mod scoring;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use filters::matches_consumer_query;
pub use impact::{calculate_economics, calculate_environmental};
pub use matcher::{MatchResult, Matcher, DEFAULT_ADMISSION_THRESHOLD, DEFAULT_LIMIT};
pub use pair::{PairScorer, ScoredPair};
pub use scoring::{score_compliance, score_distance, score_material, score_quality, score_volume};

/// Round to `decimals` places, ties to even
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
