//! Oyster card statement parser.
//!
//! Reconstructs journey records (date, origin, destination, mode) from the
//! text extracted out of Oyster PDF statements, and exports them as a
//! table.

pub mod domain;
pub mod export;
pub mod statement;
