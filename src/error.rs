use thiserror::Error;

use crate::services::{CacheError, CatalogError};

/// Errors surfaced by the matching crate
///
/// The engine itself never fails; these cover caller-side validation,
/// configuration and the batch runner's I/O.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
