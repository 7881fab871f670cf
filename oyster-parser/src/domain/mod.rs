//! Domain types for Oyster statement parsing.
//!
//! These types carry validated statement data. Invariants are enforced at
//! construction time, so code that receives them can trust their validity.

mod journey;
mod price;

pub use journey::JourneyRecord;
pub use price::{Price, PriceOutOfRange};
