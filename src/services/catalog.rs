use std::collections::HashSet;

use thiserror::Error;

use crate::core::filters::matches_consumer_query;
use crate::models::{Consumer, ConsumerQuery};

/// Errors that can occur while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate consumer id: {0}")]
    DuplicateConsumer(String),
}

/// Source of consumer records for a matching run
pub trait ConsumerCatalog {
    /// Every consumer in the catalog
    fn all(&self) -> Vec<Consumer>;

    /// Consumers satisfying every populated field of `query`
    fn search(&self, query: &ConsumerQuery) -> Vec<Consumer>;
}

/// Catalog held entirely in memory, in load order
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    consumers: Vec<Consumer>,
}

impl InMemoryCatalog {
    pub fn new(consumers: Vec<Consumer>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(consumers.len());
        for consumer in &consumers {
            if !seen.insert(consumer.consumer_id.as_str()) {
                return Err(CatalogError::DuplicateConsumer(consumer.consumer_id.clone()));
            }
        }

        tracing::debug!("Loaded catalog with {} consumers", consumers.len());
        Ok(Self { consumers })
    }

    /// Load a catalog from a JSON array of consumer records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let consumers: Vec<Consumer> = serde_json::from_str(json)?;
        Self::new(consumers)
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }
}

impl ConsumerCatalog for InMemoryCatalog {
    fn all(&self) -> Vec<Consumer> {
        self.consumers.clone()
    }

    fn search(&self, query: &ConsumerQuery) -> Vec<Consumer> {
        self.consumers
            .iter()
            .filter(|consumer| matches_consumer_query(consumer, query))
            .cloned()
            .collect()
    }
}
