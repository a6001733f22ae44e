//! Tiered location search.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, CatalogError};
use crate::domain::{Language, LocationRecord};

use super::config::SearchConfig;

/// How closely a name matches the query, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    Exact,
    Prefix,
    Contains,
}

impl MatchTier {
    /// All tiers in priority order.
    pub const ALL: [MatchTier; 3] = [MatchTier::Exact, MatchTier::Prefix, MatchTier::Contains];

    /// Whether a folded name satisfies this tier for a folded query.
    pub fn matches(&self, name: &str, query: &str) -> bool {
        match self {
            MatchTier::Exact => name == query,
            MatchTier::Prefix => name.starts_with(query),
            MatchTier::Contains => name.contains(query),
        }
    }

    fn matches_names(&self, en: &str, bn: &str, language: Language, query: &str) -> bool {
        match language {
            Language::English => self.matches(en, query),
            Language::Bengali => self.matches(bn, query),
            Language::Any => self.matches(en, query) || self.matches(bn, query),
        }
    }
}

/// Result of a location search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Matching records, best tier first.
    pub locations: Vec<LocationRecord>,
    /// Number of records returned (after dedup and limit).
    pub total: usize,
    /// The trimmed, case-folded query that was matched.
    pub query: String,
}

/// Searches the location catalog.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    /// Search for locations whose name matches `query`.
    ///
    /// Every record is tested against each tier in turn (exact, prefix,
    /// contains); a record keeps the position of the first tier it
    /// satisfies. Records equal in all four fields appear once. An empty
    /// query returns the head of the catalog in dataset order.
    pub fn search(
        &self,
        query: &str,
        language: Language,
        limit: Option<i64>,
    ) -> Result<SearchOutcome, CatalogError> {
        let limit = self.config.effective_limit(limit);
        let snapshot = self.catalog.snapshot()?;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            let locations: Vec<_> = snapshot.records().iter().take(limit).cloned().collect();
            return Ok(SearchOutcome {
                total: locations.len(),
                locations,
                query: String::new(),
            });
        }

        let query = trimmed.to_lowercase();
        let mut seen = HashSet::new();
        let mut locations = Vec::new();

        // Collecting in tier order and skipping seen keys yields the same
        // prefix as concatenating all tiers then deduplicating.
        'tiers: for tier in MatchTier::ALL {
            for (record, folded) in snapshot.entries() {
                if !tier.matches_names(&folded.en, &folded.bn, language, &query) {
                    continue;
                }
                if seen.insert(record.key()) {
                    locations.push(record.clone());
                    if locations.len() == limit {
                        break 'tiers;
                    }
                }
            }
        }

        debug!(%query, %language, limit, found = locations.len(), "Location search");

        Ok(SearchOutcome {
            total: locations.len(),
            locations,
            query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(en: &str, bn: &str, lat: f64, lon: f64) -> LocationRecord {
        LocationRecord::new(en, bn, lat, lon)
    }

    fn engine(records: Vec<LocationRecord>) -> SearchEngine {
        SearchEngine::new(
            Arc::new(Catalog::from_records(records)),
            SearchConfig::default(),
        )
    }

    fn names(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.locations.iter().map(|r| r.name_en.as_str()).collect()
    }

    fn dhaka() -> Vec<LocationRecord> {
        vec![
            loc("Uttara Sector 7", "উত্তরা সেক্টর ৭", 23.8687, 90.3973),
            loc("Mirpur 10", "মিরপুর ১০", 23.8069, 90.3687),
            loc("Old Mirpur Road", "পুরাতন মিরপুর রোড", 23.7502, 90.3780),
            loc("Mirpur", "মিরপুর", 23.8223, 90.3654),
            loc("Gulshan 1", "গুলশান ১", 23.7806, 90.4167),
        ]
    }

    #[test]
    fn tiers_ordered_exact_prefix_contains() {
        let outcome = engine(dhaka()).search("mirpur", Language::English, None).unwrap();
        assert_eq!(names(&outcome), vec!["Mirpur", "Mirpur 10", "Old Mirpur Road"]);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.query, "mirpur");
    }

    #[test]
    fn query_is_trimmed_and_folded() {
        let outcome = engine(dhaka())
            .search("  GULSHAN ", Language::English, None)
            .unwrap();
        assert_eq!(names(&outcome), vec!["Gulshan 1"]);
        assert_eq!(outcome.query, "gulshan");
    }

    #[test]
    fn bengali_matches_bengali_field_only() {
        let outcome = engine(dhaka()).search("মিরপুর", Language::Bengali, None).unwrap();
        assert_eq!(names(&outcome), vec!["Mirpur", "Mirpur 10", "Old Mirpur Road"]);

        let outcome = engine(dhaka()).search("mirpur", Language::Bengali, None).unwrap();
        assert!(outcome.locations.is_empty());
        assert_eq!(outcome.total, 0);
    }

    #[test]
    fn english_ignores_bengali_field() {
        let outcome = engine(dhaka()).search("গুলশান", Language::English, None).unwrap();
        assert!(outcome.locations.is_empty());
    }

    #[test]
    fn unknown_language_matches_either_field() {
        let engine = engine(dhaka());
        let outcome = engine.search("গুলশান", Language::Any, None).unwrap();
        assert_eq!(names(&outcome), vec!["Gulshan 1"]);
        let outcome = engine.search("gulshan", Language::Any, None).unwrap();
        assert_eq!(names(&outcome), vec!["Gulshan 1"]);
    }

    #[test]
    fn duplicate_records_appear_once() {
        let shahbag = loc("Shahbag", "শাহবাগ", 23.7383, 90.3957);
        let outcome = engine(vec![shahbag.clone(), shahbag.clone(), shahbag])
            .search("shahbag", Language::English, None)
            .unwrap();
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn signed_zero_coordinates_dedup() {
        let outcome = engine(vec![
            loc("Zero", "শূন্য", 0.0, 90.0),
            loc("Zero", "শূন্য", -0.0, 90.0),
        ])
        .search("zero", Language::English, None)
        .unwrap();
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.total, 1);
    }

    #[test]
    fn same_name_different_coordinates_both_kept() {
        let outcome = engine(vec![
            loc("Shahbag", "শাহবাগ", 23.7383, 90.3957),
            loc("Shahbag", "শাহবাগ", 23.7384, 90.3957),
        ])
        .search("shahbag", Language::English, None)
        .unwrap();
        assert_eq!(outcome.locations.len(), 2);
    }

    #[test]
    fn empty_query_returns_head_of_catalog() {
        let outcome = engine(dhaka()).search("   ", Language::English, Some(2)).unwrap();
        assert_eq!(names(&outcome), vec!["Uttara Sector 7", "Mirpur 10"]);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.query, "");
    }

    #[test]
    fn empty_query_smaller_catalog_than_limit() {
        let outcome = engine(dhaka()).search("", Language::English, None).unwrap();
        assert_eq!(outcome.locations.len(), 5);
        assert_eq!(outcome.total, 5);
    }

    #[test]
    fn total_counts_returned_not_matched() {
        let records: Vec<_> = (0..30)
            .map(|i| loc(&format!("Stop {i}"), &format!("স্টপ {i}"), 23.7 + i as f64 * 0.001, 90.4))
            .collect();
        let engine = engine(records);

        let outcome = engine.search("stop", Language::English, Some(7)).unwrap();
        assert_eq!(outcome.locations.len(), 7);
        assert_eq!(outcome.total, 7);

        let outcome = engine.search("stop", Language::English, Some(0)).unwrap();
        assert_eq!(outcome.total, 20);
    }

    #[test]
    fn limit_truncates_after_priority() {
        let outcome = engine(dhaka())
            .search("mirpur", Language::English, Some(2))
            .unwrap();
        assert_eq!(names(&outcome), vec!["Mirpur", "Mirpur 10"]);
    }

    #[test]
    fn tier_matches() {
        assert!(MatchTier::Exact.matches("banani", "banani"));
        assert!(!MatchTier::Exact.matches("banani 11", "banani"));
        assert!(MatchTier::Prefix.matches("banani 11", "banani"));
        assert!(!MatchTier::Prefix.matches("old banani", "banani"));
        assert!(MatchTier::Contains.matches("old banani", "banani"));
    }

    #[test]
    fn missing_catalog_is_error() {
        let engine = SearchEngine::new(
            Arc::new(Catalog::new(crate::catalog::CatalogSource::file(
                "/nonexistent/areas.json",
            ))),
            SearchConfig::default(),
        );
        assert!(engine.search("x", Language::English, None).is_err());
    }
}
