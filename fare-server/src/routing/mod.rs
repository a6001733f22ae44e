//! Driving-distance lookup between catalog locations.
//!
//! Distances come from an OSRM routing backend. Lookups can fail; callers
//! decide what to do then, typically substituting a fixed default via
//! [`resolve_distance`].

mod cache;
mod error;
mod osrm;
mod resolver;

pub use cache::{CachedResolver, RouteCacheConfig};
pub use error::RoutingError;
pub use osrm::{OsrmClient, OsrmConfig};
pub use resolver::{
    DEFAULT_FALLBACK_KM, DistanceResolver, DistanceSource, FixedDistance, ResolvedDistance,
    resolve_distance,
};
