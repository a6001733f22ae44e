//! Location search.
//!
//! Free-text lookup over the catalog with exact, prefix and substring
//! tiers, deduplicated and bounded by a result limit.

mod config;
mod engine;

pub use config::SearchConfig;
pub use engine::{MatchTier, SearchEngine, SearchOutcome};
