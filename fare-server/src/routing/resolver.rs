//! The distance-resolution seam and its fallback policy.

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::domain::{FareRequest, LocationRecord};

use super::error::RoutingError;

/// Distance substituted when a route lookup fails.
pub const DEFAULT_FALLBACK_KM: f64 = 5.0;

/// Something that can find the driving distance between two locations.
pub trait DistanceResolver: Send + Sync {
    /// Driving distance in kilometres from `start` to `end`.
    fn resolve_km<'a>(
        &'a self,
        start: &'a LocationRecord,
        end: &'a LocationRecord,
    ) -> BoxFuture<'a, Result<f64, RoutingError>>;

    /// Whether the resolver is currently able to answer.
    fn ping(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { true })
    }
}

/// Resolver that always answers with the same distance, or always fails.
///
/// Used when no routing backend is configured, and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDistance(Option<f64>);

impl FixedDistance {
    pub fn km(km: f64) -> Self {
        Self(Some(km))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl DistanceResolver for FixedDistance {
    fn resolve_km<'a>(
        &'a self,
        _start: &'a LocationRecord,
        _end: &'a LocationRecord,
    ) -> BoxFuture<'a, Result<f64, RoutingError>> {
        let result = self
            .0
            .ok_or_else(|| RoutingError::Unavailable("no routing backend configured".into()));
        Box::pin(async move { result })
    }

    fn ping(&self) -> BoxFuture<'_, bool> {
        let available = self.0.is_some();
        Box::pin(async move { available })
    }
}

/// Where a resolved distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    /// The request carried a positive distance.
    Supplied,
    /// Looked up from the request's endpoints.
    Routed,
    /// Lookup failed; the default distance was substituted.
    Fallback,
    /// Nothing to go on.
    Missing,
}

/// The distance a fare will be priced over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDistance {
    pub km: f64,
    pub source: DistanceSource,
}

/// Decide the distance to price `request` over.
///
/// A positive supplied distance wins. Otherwise two named endpoints are
/// routed, falling back to `fallback_km` when the lookup fails. With
/// neither, the distance is zero and pricing will reject the request.
pub async fn resolve_distance(
    request: &FareRequest,
    resolver: &dyn DistanceResolver,
    fallback_km: f64,
) -> ResolvedDistance {
    if let Some(km) = request.supplied_distance() {
        return ResolvedDistance {
            km,
            source: DistanceSource::Supplied,
        };
    }

    let Some((start, end)) = request.named_endpoints() else {
        return ResolvedDistance {
            km: 0.0,
            source: DistanceSource::Missing,
        };
    };

    match resolver.resolve_km(start, end).await {
        Ok(km) => {
            debug!(from = %start.name_en, to = %end.name_en, km, "Resolved route distance");
            ResolvedDistance {
                km,
                source: DistanceSource::Routed,
            }
        }
        Err(e) => {
            warn!(
                from = %start.name_en,
                to = %end.name_en,
                error = %e,
                fallback_km,
                "Distance lookup failed, using default distance"
            );
            ResolvedDistance {
                km: fallback_km,
                source: DistanceSource::Fallback,
            }
        }
    }
}
