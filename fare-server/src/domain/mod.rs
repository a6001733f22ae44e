//! Domain types for the bus fare service.
//!
//! Locations are immutable once loaded from the catalog. Fare requests and
//! breakdowns are plain values with no lifecycle of their own.

mod error;
mod fare;
mod location;

pub use error::ValidationError;
pub use fare::{BusCategory, DiscountCategory, FareBreakdown, FareRequest};
pub use location::{Language, LocationKey, LocationRecord};
