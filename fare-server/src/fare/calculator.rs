//! Fare calculator.

use crate::domain::{FareBreakdown, FareRequest, ValidationError};

use super::rates::RateTable;

/// Prices trips using a [`RateTable`].
#[derive(Debug, Clone, Default)]
pub struct FareCalculator {
    rates: RateTable,
}

impl FareCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// Price `request` over `distance_km`.
    ///
    /// `distance_km` is the resolved distance, whether supplied by the
    /// caller or looked up from the endpoints. A non-positive distance is
    /// only rejected when the request also lacks two named endpoints.
    pub fn calculate(
        &self,
        request: &FareRequest,
        distance_km: f64,
    ) -> Result<FareBreakdown, ValidationError> {
        if distance_km <= 0.0 && request.named_endpoints().is_none() {
            return Err(ValidationError::MissingDistance);
        }

        let bus = request.bus_category.unwrap_or_default();
        let discount = self.rates.discount(request.discount_category.unwrap_or_default());

        let base_fare = (distance_km * self.rates.rate_per_km(bus)).max(self.rates.min_base_fare);
        let fare = (base_fare * (1.0 - discount.percentage / 100.0)).max(self.rates.min_fare);

        Ok(FareBreakdown {
            fare,
            distance_km,
            bus_category: bus,
            base_fare,
            discount_label: discount.label.clone(),
            discount_percentage: discount.percentage,
        })
    }
}
