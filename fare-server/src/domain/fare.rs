//! Fare request and breakdown types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LocationRecord;

/// Bus category, which selects the per-km rate.
///
/// Deserialization is lenient: anything other than `"AC"` prices as a
/// non-AC bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum BusCategory {
    #[default]
    #[serde(rename = "nonAC")]
    NonAc,
    #[serde(rename = "AC")]
    Ac,
}

impl BusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusCategory::NonAc => "nonAC",
            BusCategory::Ac => "AC",
        }
    }
}

impl From<String> for BusCategory {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("ac") {
            BusCategory::Ac
        } else {
            BusCategory::NonAc
        }
    }
}

impl fmt::Display for BusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount category, parsed ignoring ASCII case. Unrecognized values mean
/// no discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum DiscountCategory {
    #[default]
    None,
    Student,
    Pass,
}

impl DiscountCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountCategory::None => "none",
            DiscountCategory::Student => "student",
            DiscountCategory::Pass => "pass",
        }
    }
}

impl From<String> for DiscountCategory {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "student" => DiscountCategory::Student,
            "pass" => DiscountCategory::Pass,
            _ => DiscountCategory::None,
        }
    }
}

impl fmt::Display for DiscountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to price a trip.
///
/// Valid when it carries a positive distance, or two endpoints that both
/// have an English name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareRequest {
    #[serde(default)]
    pub start_location: Option<LocationRecord>,
    #[serde(default)]
    pub end_location: Option<LocationRecord>,
    #[serde(default, rename = "distance")]
    pub distance_km: Option<f64>,
    #[serde(default, rename = "busType")]
    pub bus_category: Option<BusCategory>,
    #[serde(default, rename = "discountType")]
    pub discount_category: Option<DiscountCategory>,
}

impl FareRequest {
    /// A request for a literal distance.
    pub fn for_distance(distance_km: f64) -> Self {
        Self {
            distance_km: Some(distance_km),
            ..Self::default()
        }
    }

    /// A request between two catalog locations.
    pub fn between(start: LocationRecord, end: LocationRecord) -> Self {
        Self {
            start_location: Some(start),
            end_location: Some(end),
            ..Self::default()
        }
    }

    pub fn with_bus(mut self, bus: BusCategory) -> Self {
        self.bus_category = Some(bus);
        self
    }

    pub fn with_discount(mut self, discount: DiscountCategory) -> Self {
        self.discount_category = Some(discount);
        self
    }

    /// The caller-supplied distance, if it is positive.
    pub fn supplied_distance(&self) -> Option<f64> {
        self.distance_km.filter(|d| *d > 0.0)
    }

    /// Both endpoints, if both carry an English name.
    pub fn named_endpoints(&self) -> Option<(&LocationRecord, &LocationRecord)> {
        match (&self.start_location, &self.end_location) {
            (Some(start), Some(end)) if start.is_named() && end.is_named() => Some((start, end)),
            _ => None,
        }
    }
}

/// The priced result of a fare request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    /// Final fare after discount and minimum fare.
    pub fare: f64,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "busType")]
    pub bus_category: BusCategory,
    /// Pre-discount fare, after the base minimum is applied.
    #[serde(rename = "baseRate")]
    pub base_fare: f64,
    #[serde(rename = "discountApplied")]
    pub discount_label: String,
    pub discount_percentage: f64,
}
