// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CacheError, CacheKey, CacheStats, MatchCache};
pub use catalog::{CatalogError, ConsumerCatalog, InMemoryCatalog};
