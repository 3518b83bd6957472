//! Waste Match - ranks industrial buyers for a producer's waste streams
//!
//! Every (stream, consumer) pair is scored on material, quality, volume,
//! distance and compliance, annotated with economic and environmental
//! projections, deduplicated to one match per consumer and ranked.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod runner;
pub mod services;

// Re-export commonly used types
pub use core::{distance::haversine_distance, MatchResult, Matcher, PairScorer};
pub use error::MatchError;
pub use models::{
    Consumer, FindMatchesRequest, FindMatchesResponse, Location, MatchRecord, ScoringWeights,
    Stream,
};
pub use runner::Runner;
