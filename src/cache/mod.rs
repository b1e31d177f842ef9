//! Profile caching

pub mod profile_cache;
pub mod stats;

pub use profile_cache::ProfileCache;
pub use stats::CacheStats;
