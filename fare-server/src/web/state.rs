//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::fare::FareCalculator;
use crate::routing::DistanceResolver;
use crate::search::SearchEngine;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Location catalog
    pub catalog: Arc<Catalog>,

    /// Search over the catalog
    pub search: Arc<SearchEngine>,

    /// Fare pricing
    pub fares: Arc<FareCalculator>,

    /// Driving-distance lookup between endpoints
    pub routing: Arc<dyn DistanceResolver>,

    /// Distance substituted when a route lookup fails (km)
    pub fallback_km: f64,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: Arc<Catalog>,
        search: SearchEngine,
        fares: FareCalculator,
        routing: Arc<dyn DistanceResolver>,
        fallback_km: f64,
    ) -> Self {
        Self {
            catalog,
            search: Arc::new(search),
            fares: Arc::new(fares),
            routing,
            fallback_km,
        }
    }
}
