//! Fare calculation.
//!
//! Pure pricing of a resolved distance by bus category and discount. The
//! calculator never looks up distances itself.

mod calculator;
mod rates;

pub use calculator::FareCalculator;
pub use rates::{Discount, RateTable};
