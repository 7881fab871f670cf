//! Fare amounts.

use std::fmt;

use serde::Serialize;

/// Error returned when an amount falls outside the range a single Oyster
/// charge can take.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("price {amount} is outside the expected range [0, 100)")]
pub struct PriceOutOfRange {
    /// The offending amount.
    pub amount: f64,
}

/// A fare in pounds.
///
/// Oyster statements never show a single charge of £100 or more, so any
/// `Price` is guaranteed to lie in `[0, 100)` by construction.
///
/// # Examples
///
/// ```
/// use oyster_parser::domain::Price;
///
/// let fare = Price::new(2.9).unwrap();
/// assert_eq!(fare.pence(), 290);
/// assert_eq!(fare.to_string(), "£2.90");
///
/// assert!(Price::new(100.0).is_err());
/// assert!(Price::new(-0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Upper bound (exclusive) for a single charge.
    pub const MAX: f64 = 100.0;

    /// Create a price, rejecting amounts outside `[0, 100)`.
    pub fn new(amount: f64) -> Result<Self, PriceOutOfRange> {
        // NaN fails both comparisons
        if (0.0..Self::MAX).contains(&amount) {
            Ok(Self(amount))
        } else {
            Err(PriceOutOfRange { amount })
        }
    }

    /// Returns the amount in pounds.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to whole pence.
    pub fn pence(&self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pence = self.pence();
        write!(f, "£{}.{:02}", pence / 100, pence % 100)
    }
}
