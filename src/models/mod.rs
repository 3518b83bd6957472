// Model exports
pub mod classify;
pub mod domain;
pub mod pricing;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, ComplianceStatus, Consumer, ConsumerQuery, DimensionScores, Economics,
    Environmental, HazardClass, ItemProfile, Location, MatchRecord, QualityGrade, ScoringWeights,
    Stream,
};
pub use pricing::{PricingModel, PricingTerms};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse};
