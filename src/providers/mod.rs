pub mod rest_record;

// Re-export so callers wire providers and cache from one path
pub use crate::cache::Cache;
