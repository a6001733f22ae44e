//! Caching layer for route lookups.
//!
//! The catalog is static, so the driving distance between two of its
//! locations rarely changes. Successful lookups are memoised; failures are
//! not, so a recovering backend is retried on the next request. Health
//! pings are remembered briefly so frequent health checks never wait on
//! the backend more than once per ping TTL.

use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;

use crate::domain::{LocationKey, LocationRecord};

use super::error::RoutingError;
use super::resolver::DistanceResolver;

/// Cache key: (start, end). Direction matters for driving routes.
type RouteKey = (LocationKey, LocationKey);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached distances.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,

    /// How long a ping result is reused.
    pub ping_ttl: Duration,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
            ping_ttl: Duration::from_secs(30),
        }
    }
}

/// A [`DistanceResolver`] that remembers successful answers.
pub struct CachedResolver<R> {
    inner: R,
    routes: MokaCache<RouteKey, f64>,
    pings: MokaCache<(), bool>,
}

impl<R: DistanceResolver> CachedResolver<R> {
    pub fn new(inner: R, config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let pings = MokaCache::builder()
            .time_to_live(config.ping_ttl)
            .max_capacity(1)
            .build();

        Self {
            inner,
            routes,
            pings,
        }
    }

    async fn lookup(
        &self,
        start: &LocationRecord,
        end: &LocationRecord,
    ) -> Result<f64, RoutingError> {
        let key = (start.key(), end.key());

        if let Some(km) = self.routes.get(&key).await {
            return Ok(km);
        }

        let km = self.inner.resolve_km(start, end).await?;
        self.routes.insert(key, km).await;
        Ok(km)
    }
}

impl<R: DistanceResolver> DistanceResolver for CachedResolver<R> {
    fn resolve_km<'a>(
        &'a self,
        start: &'a LocationRecord,
        end: &'a LocationRecord,
    ) -> BoxFuture<'a, Result<f64, RoutingError>> {
        Box::pin(self.lookup(start, end))
    }

    fn ping(&self) -> BoxFuture<'_, bool> {
        // Concurrent callers share one in-flight ping
        Box::pin(self.pings.get_with((), async move { self.inner.ping().await }))
    }
}
