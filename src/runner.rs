use crate::config::Settings;
use crate::core::{MatchResult, Matcher};
use crate::error::MatchError;
use crate::models::{ConsumerQuery, FindMatchesRequest, FindMatchesResponse};
use crate::services::{ConsumerCatalog, InMemoryCatalog, MatchCache};

/// Runs validated match requests against a configured matcher
pub struct Runner {
    matcher: Matcher,
    cache: Option<MatchCache>,
    default_limit: usize,
    max_limit: usize,
}

impl Runner {
    pub fn from_settings(settings: &Settings) -> Result<Self, MatchError> {
        settings.validate()?;

        let mut matcher = Matcher::new(settings.weights())
            .with_admission_threshold(settings.matching.admission_threshold);
        if !settings.matching.parallel {
            matcher = matcher.sequential();
        }

        let cache = settings.cache.enabled.then(|| {
            tracing::info!(
                "Match cache enabled ({} entries, TTL: {}s)",
                settings.cache.capacity,
                settings.cache.ttl_secs
            );
            MatchCache::new(settings.cache.capacity, settings.cache.ttl_secs)
        });

        tracing::info!("Matcher initialized with weights: {:?}", matcher.weights());

        Ok(Self {
            matcher,
            cache,
            default_limit: settings.matching.default_limit,
            max_limit: settings.matching.max_limit,
        })
    }

    /// Validate a request, narrow its catalog and rank the matches
    pub fn run(&self, request: FindMatchesRequest) -> Result<FindMatchesResponse, MatchError> {
        request.check()?;

        let limit = request
            .limit
            .map(usize::from)
            .unwrap_or(self.default_limit)
            .min(self.max_limit);

        let catalog = InMemoryCatalog::new(request.consumers)?;
        let consumers = match request.region_radius_km {
            Some(radius_km) => catalog.search(&ConsumerQuery {
                near: Some((request.facility_location, radius_km)),
                ..Default::default()
            }),
            None => catalog.all(),
        };

        tracing::info!(
            "Finding matches for {} streams against {} consumers, limit: {}",
            request.profile.streams.len(),
            consumers.len(),
            limit
        );

        let result = match &self.cache {
            Some(cache) => {
                let cached = cache.find_matches(
                    &self.matcher,
                    &request.profile.streams,
                    &consumers,
                    &request.facility_location,
                    limit,
                )?;
                tracing::debug!("Match cache holds {} runs", cache.stats().entries);
                MatchResult::clone(&cached)
            }
            None => self.matcher.find_matches(
                &request.profile.streams,
                &consumers,
                &request.facility_location,
                limit,
            ),
        };

        tracing::info!(
            "Returning {} matches (from {} admitted pairs)",
            result.matches.len(),
            result.pairs_admitted
        );

        Ok(FindMatchesResponse {
            matches: result.matches,
            pairs_evaluated: result.pairs_evaluated,
            pairs_admitted: result.pairs_admitted,
            overall_confidence: request.profile.overall_confidence,
            generated_at: chrono::Utc::now(),
        })
    }
}
