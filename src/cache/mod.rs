//! Cache Module
//!
//! Provides the in-memory TTL cache of normalized record sets.

mod entry;
mod stats;
mod store;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
