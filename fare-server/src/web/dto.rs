//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Language, LocationRecord};
use crate::search::SearchOutcome;

/// Query parameters for location search.
///
/// All fields are raw strings: bad values fall back to defaults rather than
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchLocationsRequest {
    /// Free-text query (English or Bengali)
    pub q: Option<String>,

    /// Preferred language, "en" or "bn"
    pub lang: Option<String>,

    /// Maximum number of results
    pub limit: Option<String>,
}

impl SearchLocationsRequest {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    /// Requested language. Missing or unsupported codes mean English.
    pub fn language(&self) -> Language {
        match self.lang.as_deref().map(Language::from_code) {
            Some(Language::Bengali) => Language::Bengali,
            _ => Language::English,
        }
    }

    /// Requested limit, if it parses as an integer.
    ///
    /// Positive integers too large for `i64` saturate so they are clamped
    /// like any other oversized limit.
    pub fn limit(&self) -> Option<i64> {
        let raw = self.limit.as_deref()?.trim();
        match raw.parse() {
            Ok(n) => Some(n),
            Err(_) if is_unsigned_integer(raw) => Some(i64::MAX),
            Err(_) => None,
        }
    }
}

fn is_unsigned_integer(s: &str) -> bool {
    let digits = s.strip_prefix('+').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Response listing every location.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationRecord>,
    pub total: usize,
}

/// Response for location search.
#[derive(Debug, Serialize)]
pub struct SearchLocationsResponse {
    /// Matching locations, best first
    pub locations: Vec<LocationRecord>,

    /// Number of locations returned
    pub total: usize,

    /// Normalized query that was matched
    pub query: String,
}

impl From<SearchOutcome> for SearchLocationsResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            locations: outcome.locations,
            total: outcome.total,
            query: outcome.query,
        }
    }
}

/// Catalog statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatsResponse {
    pub total_locations: usize,
    pub cache_status: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Number of loaded locations
    pub locations: usize,
    /// Whether the routing backend answered a ping
    pub routing: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
