use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{DEFAULT_ADMISSION_THRESHOLD, DEFAULT_LIMIT};
use crate::error::MatchError;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: f64,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            admission_threshold: default_admission_threshold(),
            parallel: true,
        }
    }
}

fn default_limit() -> usize { DEFAULT_LIMIT }
fn default_max_limit() -> usize { 100 }
fn default_admission_threshold() -> f64 { DEFAULT_ADMISSION_THRESHOLD }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_material_weight")]
    pub material: f64,
    #[serde(default = "default_quality_weight")]
    pub quality: f64,
    #[serde(default = "default_volume_weight")]
    pub volume: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_compliance_weight")]
    pub compliance: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            material: default_material_weight(),
            quality: default_quality_weight(),
            volume: default_volume_weight(),
            distance: default_distance_weight(),
            compliance: default_compliance_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            material: config.material,
            quality: config.quality,
            volume: config.volume,
            distance: config.distance,
            compliance: config.compliance,
        }
    }
}

fn default_material_weight() -> f64 { 0.35 }
fn default_quality_weight() -> f64 { 0.20 }
fn default_volume_weight() -> f64 { 0.15 }
fn default_distance_weight() -> f64 { 0.20 }
fn default_compliance_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_capacity() -> u64 { 256 }
fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with WASTE_MATCH)
    pub fn load() -> Result<Self, MatchError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WASTE_MATCH__MATCHING__DEFAULT_LIMIT -> matching.default_limit
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, MatchError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    fn finish(config: Config) -> Result<Self, MatchError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> Result<(), MatchError> {
        self.weights().validate()?;

        let threshold = self.matching.admission_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MatchError::InvalidInput(format!(
                "matching.admission_threshold must be within 0..=1, got {}",
                threshold
            )));
        }

        if self.matching.default_limit == 0 || self.matching.default_limit > self.matching.max_limit {
            return Err(MatchError::InvalidInput(format!(
                "matching.default_limit must be within 1..={}, got {}",
                self.matching.max_limit, self.matching.default_limit
            )));
        }

        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("WASTE_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
