//! Journey records.
//!
//! A `JourneyRecord` is one travel leg recovered from a statement: the day
//! it happened, where it started, where it ended (when the statement says)
//! and whether it was a rail leg.

use chrono::NaiveDate;
use serde::Serialize;

/// One leg of travel from a statement.
///
/// Rail legs (tube, overground, national rail) name both ends. Bus legs
/// only carry a single label such as "Bus Journey, Route 46", so `to` is
/// empty for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyRecord {
    /// Day of travel
    pub date: NaiveDate,
    /// Origin label
    pub from: String,
    /// Destination label, empty for bus and other single-label legs
    pub to: String,
    /// Whether the leg named both an origin and a destination
    pub is_train: bool,
}

impl JourneyRecord {
    /// Creates a rail leg between two named stations.
    pub fn train(date: NaiveDate, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            date,
            from: from.into(),
            to: to.into(),
            is_train: true,
        }
    }

    /// Creates a single-label leg (bus or other).
    pub fn single(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            from: label.into(),
            to: String::new(),
            is_train: false,
        }
    }

    /// Returns true if this leg has a known destination.
    pub fn has_destination(&self) -> bool {
        !self.to.is_empty()
    }
}
