//! Fixed decimal rounding for reported quantities

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `decimal_places` using round-half-to-even.
///
/// The exact binary value of the `f64` is rounded, so `2.675` (stored as
/// `2.67499999...`) rounds down to `2.67`. Non-finite input is returned as is.
pub fn round_half_even(value: f64, decimal_places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
