use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::core::{MatchResult, Matcher};
use crate::models::{Consumer, Location, ScoringWeights, Stream};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// In-memory cache of whole matching runs
///
/// Entries are keyed on every input that affects the result, including the
/// facility location and the matcher's weights and threshold, so a cache can
/// be shared between matchers and facilities safely.
pub struct MatchCache {
    runs: moka::sync::Cache<String, Arc<MatchResult>>,
}

impl MatchCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let runs = moka::sync::Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { runs }
    }

    /// Return the cached result for these inputs or run the matcher
    pub fn find_matches(
        &self,
        matcher: &Matcher,
        streams: &[Stream],
        consumers: &[Consumer],
        facility: &Location,
        limit: usize,
    ) -> Result<Arc<MatchResult>, CacheError> {
        let key = CacheKey::run(matcher, streams, consumers, facility, limit)?;

        if let Some(hit) = self.runs.get(&key) {
            tracing::trace!("Match cache hit ({} matches)", hit.matches.len());
            return Ok(hit);
        }

        tracing::trace!("Match cache miss");
        let result = Arc::new(matcher.find_matches(streams, consumers, facility, limit));
        self.runs.insert(key, Arc::clone(&result));
        Ok(result)
    }

    pub fn invalidate_all(&self) {
        self.runs.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Flushes moka's pending maintenance first; the entry count lags otherwise.
    pub fn stats(&self) -> CacheStats {
        self.runs.run_pending_tasks();
        CacheStats {
            entries: self.runs.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

#[derive(Serialize)]
struct RunKey<'a> {
    weights: &'a ScoringWeights,
    threshold: f64,
    facility: &'a Location,
    limit: usize,
    streams: &'a [Stream],
    consumers: &'a [Consumer],
}

impl CacheKey {
    /// Build a cache key covering the full input of a matching run
    pub fn run(
        matcher: &Matcher,
        streams: &[Stream],
        consumers: &[Consumer],
        facility: &Location,
        limit: usize,
    ) -> Result<String, CacheError> {
        let key = RunKey {
            weights: matcher.weights(),
            threshold: matcher.admission_threshold(),
            facility,
            limit,
            streams,
            consumers,
        };
        Ok(format!("run:{}", serde_json::to_string(&key)?))
    }
}
