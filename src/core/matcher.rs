use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::pair::PairScorer;
use crate::models::{Consumer, Location, MatchRecord, ScoringWeights, Stream};

/// Pairs must score strictly above this (unscaled) to be considered
pub const DEFAULT_ADMISSION_THRESHOLD: f64 = 0.3;

/// Number of matches returned when the caller does not ask for a count
pub const DEFAULT_LIMIT: usize = 10;

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<MatchRecord>,
    pub pairs_evaluated: usize,
    pub pairs_admitted: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every (stream, consumer) pair
/// 2. Admit pairs above the threshold
/// 3. Keep one pair per consumer
/// 4. Rank by overall score and truncate
#[derive(Debug, Clone)]
pub struct Matcher {
    scorer: PairScorer,
    admission_threshold: f64,
    parallel: bool,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scorer: PairScorer::new(weights),
            admission_threshold: DEFAULT_ADMISSION_THRESHOLD,
            parallel: true,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn with_admission_threshold(mut self, threshold: f64) -> Self {
        self.admission_threshold = threshold;
        self
    }

    /// Score pairs on the calling thread instead of the rayon pool
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scorer.weights()
    }

    pub fn admission_threshold(&self) -> f64 {
        self.admission_threshold
    }

    /// Rank consumers for a producer's streams
    ///
    /// # Arguments
    /// * `streams` - The producer's output streams
    /// * `consumers` - Candidate consumers from the catalog
    /// * `facility` - Location of the producing facility
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// MatchResult with at most `limit` records, one per consumer, sorted by
    /// overall score descending
    pub fn find_matches(
        &self,
        streams: &[Stream],
        consumers: &[Consumer],
        facility: &Location,
        limit: usize,
    ) -> MatchResult {
        let pairs_evaluated = streams.len() * consumers.len();

        // Stages 1 & 2, collected in stream-major order either way
        let admitted: Vec<MatchRecord> = if self.parallel {
            streams
                .par_iter()
                .flat_map_iter(|stream| {
                    consumers
                        .iter()
                        .filter_map(move |consumer| self.admit(stream, consumer, facility))
                })
                .collect()
        } else {
            streams
                .iter()
                .flat_map(|stream| {
                    consumers
                        .iter()
                        .filter_map(move |consumer| self.admit(stream, consumer, facility))
                })
                .collect()
        };
        let pairs_admitted = admitted.len();

        // Stage 3
        let mut matches = keep_best_material_match(admitted);

        // Stage 4: stable, so exact ties keep encounter order
        matches.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(limit);

        tracing::debug!(
            "Scored {} pairs, admitted {}, returning {} matches",
            pairs_evaluated,
            pairs_admitted,
            matches.len()
        );

        MatchResult {
            matches,
            pairs_evaluated,
            pairs_admitted,
        }
    }

    #[inline]
    fn admit(&self, stream: &Stream, consumer: &Consumer, facility: &Location) -> Option<MatchRecord> {
        let pair = self.scorer.evaluate(stream, consumer, facility);
        if pair.total > self.admission_threshold {
            Some(pair.record)
        } else {
            None
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Collapse candidates to one record per consumer
///
/// A later candidate replaces the kept one only if its material percentage is
/// strictly higher; the overall score plays no part. The consumer keeps the
/// position of its first candidate.
fn keep_best_material_match(candidates: Vec<MatchRecord>) -> Vec<MatchRecord> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(candidates.len());
    let mut kept: Vec<MatchRecord> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match slots.get(&candidate.consumer_id) {
            Some(&slot) => {
                if let Some(current) = kept.get_mut(slot) {
                    if candidate.scores.material > current.scores.material {
                        *current = candidate;
                    }
                }
            }
            None => {
                slots.insert(candidate.consumer_id.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}
