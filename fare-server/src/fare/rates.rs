//! Named, overridable fare constants.

use crate::domain::{BusCategory, DiscountCategory};

/// A discount's display label and percentage off.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    pub label: String,
    pub percentage: f64,
}

impl Discount {
    pub fn new(label: impl Into<String>, percentage: f64) -> Self {
        Self {
            label: label.into(),
            percentage,
        }
    }
}

/// Rates, minimum fares and discounts used to price a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Per-km rate for non-AC buses.
    pub non_ac_per_km: f64,

    /// Per-km rate for AC buses.
    pub ac_per_km: f64,

    /// Floor applied to the distance-based fare before discounts.
    pub min_base_fare: f64,

    /// Floor applied to the final, discounted fare.
    pub min_fare: f64,

    pub student: Discount,
    pub pass: Discount,
    pub none: Discount,
}

impl RateTable {
    pub fn with_non_ac_rate(mut self, per_km: f64) -> Self {
        self.non_ac_per_km = per_km;
        self
    }

    pub fn with_ac_rate(mut self, per_km: f64) -> Self {
        self.ac_per_km = per_km;
        self
    }

    pub fn with_minimums(mut self, min_base_fare: f64, min_fare: f64) -> Self {
        self.min_base_fare = min_base_fare;
        self.min_fare = min_fare;
        self
    }

    /// Per-km rate for a bus category.
    pub fn rate_per_km(&self, bus: BusCategory) -> f64 {
        match bus {
            BusCategory::NonAc => self.non_ac_per_km,
            BusCategory::Ac => self.ac_per_km,
        }
    }

    /// Discount for a discount category.
    pub fn discount(&self, category: DiscountCategory) -> &Discount {
        match category {
            DiscountCategory::None => &self.none,
            DiscountCategory::Student => &self.student,
            DiscountCategory::Pass => &self.pass,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            non_ac_per_km: 12.0,
            ac_per_km: 18.0,
            min_base_fare: 20.0,
            min_fare: 10.0,
            student: Discount::new("Student Discount", 50.0),
            pass: Discount::new("Monthly Pass", 20.0),
            none: Discount::new("None", 0.0),
        }
    }
}
