//! Day blocks.
//!
//! A statement lists one block per day: the date, the day's total charge,
//! then one group per leg. Rail legs read `(origin, destination, fare,
//! time range)` and bus legs read `(route label, fare, time)`.
//!
//! Blocks are accumulated by an append-only [`BlockBuilder`] and only become
//! a [`DayBlock`] once their shape has been repaired and checked.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::Price;

use super::error::StatementError;

/// An item following a block's date line.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A charge
    Price(Price),
    /// A time or time range, as written
    Time(String),
    /// A station or route label
    Text(String),
}

impl Entry {
    /// Returns true if this is a price.
    pub fn is_price(&self) -> bool {
        matches!(self, Entry::Price(_))
    }

    /// Returns true if this is a time.
    pub fn is_time(&self) -> bool {
        matches!(self, Entry::Time(_))
    }

    /// Returns the label if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Price(price) => write!(f, "price {price}"),
            Entry::Time(time) => write!(f, "time '{time}'"),
            Entry::Text(text) => write!(f, "text '{text}'"),
        }
    }
}

/// A day block under construction.
///
/// The date is fixed when the block is opened; entries can only be
/// appended. Call [`BlockBuilder::into_validated`] once the block is
/// complete.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBuilder {
    date: NaiveDate,
    entries: Vec<Entry>,
}

impl BlockBuilder {
    /// Opens a block for the given day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns the block's date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the entries after the date, in reading order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns true if nothing followed the date line.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Repairs the known extraction defects and checks the block's shape.
    ///
    /// Two defects are repaired:
    /// - the day's total swapped with the first label (the item after the
    ///   date is not a price), by swapping them back;
    /// - a stray adjustment price after the final time, by dropping it.
    ///
    /// After repair the item after the date must be a price and the last
    /// item must be a time. A block with nothing after its date is valid
    /// and empty.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::MalformedBlock`] if the shape is still wrong
    /// after repair. No other reordering is attempted.
    pub fn into_validated(self) -> Result<DayBlock, StatementError> {
        let BlockBuilder { date, mut entries } = self;

        if entries.is_empty() {
            return Ok(DayBlock {
                date,
                total: None,
                legs: Vec::new(),
            });
        }

        if !entries[0].is_price() && entries.len() > 1 {
            debug!(%date, "swapping day total back in front of first label");
            entries.swap(0, 1);
        }

        if entries.len() > 1 && entries.last().is_some_and(Entry::is_price) {
            debug!(%date, "dropping trailing adjustment price");
            entries.pop();
        }

        let total = match entries.first() {
            Some(Entry::Price(price)) => *price,
            _ => {
                return Err(malformed(
                    date,
                    "item after the date must be the day's total price",
                    &entries,
                ));
            }
        };

        if !entries.last().is_some_and(Entry::is_time) {
            return Err(malformed(date, "block must end with a time", &entries));
        }

        let legs = entries.split_off(1);
        Ok(DayBlock {
            date,
            total: Some(total),
            legs,
        })
    }
}

/// A day block whose shape has been checked.
///
/// Either empty (no entries after the date), or a total price followed by
/// leg entries that end in a time.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBlock {
    date: NaiveDate,
    total: Option<Price>,
    legs: Vec<Entry>,
}

impl DayBlock {
    /// Returns the day.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the day's total charge, or `None` for an empty block.
    pub fn total(&self) -> Option<Price> {
        self.total
    }

    /// Returns the entries after the day's total.
    pub fn legs(&self) -> &[Entry] {
        &self.legs
    }

    /// Returns true if the block carried no entries.
    pub fn is_empty(&self) -> bool {
        self.total.is_none()
    }
}

/// Renders a block's items for error messages.
pub(crate) fn describe(date: NaiveDate, entries: &[Entry]) -> String {
    let mut out = format!("date {date}");
    for entry in entries {
        out.push_str(", ");
        out.push_str(&entry.to_string());
    }
    out
}

pub(crate) fn malformed(
    date: NaiveDate,
    reason: &'static str,
    entries: &[Entry],
) -> StatementError {
    StatementError::MalformedBlock {
        date,
        reason,
        items: describe(date, entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn price(amount: f64) -> Entry {
        Entry::Price(Price::new(amount).unwrap())
    }

    fn time(s: &str) -> Entry {
        Entry::Time(s.into())
    }

    fn text(s: &str) -> Entry {
        Entry::Text(s.into())
    }

    fn block(day: NaiveDate, entries: Vec<Entry>) -> BlockBuilder {
        let mut builder = BlockBuilder::new(day);
        for entry in entries {
            builder.push(entry);
        }
        builder
    }

    #[test]
    fn well_formed_block_is_unchanged() {
        let entries = vec![
            price(9.3),
            text("Kentish Town"),
            text("Bank"),
            price(2.4),
            time("10:01 - 10:25"),
        ];
        let validated = block(date(2016, 1, 9), entries.clone())
            .into_validated()
            .unwrap();

        assert_eq!(validated.date(), date(2016, 1, 9));
        assert_eq!(validated.total(), Some(Price::new(9.3).unwrap()));
        assert_eq!(validated.legs(), &entries[1..]);
        assert!(!validated.is_empty());
    }

    #[test]
    fn swapped_total_is_repaired() {
        let validated = block(
            date(2016, 1, 8),
            vec![
                text("Kentish Town"),
                price(5.8),
                text("Leicester Square"),
                price(2.9),
                time("08:46 - 09:01"),
            ],
        )
        .into_validated()
        .unwrap();

        assert_eq!(validated.total(), Some(Price::new(5.8).unwrap()));
        assert_eq!(
            validated.legs(),
            &[
                text("Kentish Town"),
                text("Leicester Square"),
                price(2.9),
                time("08:46 - 09:01"),
            ]
        );
    }

    #[test]
    fn trailing_price_is_dropped() {
        let validated = block(
            date(2016, 1, 30),
            vec![
                price(1.5),
                text("Bus Journey, Route 46"),
                price(1.5),
                time("14:49"),
                price(0.3),
            ],
        )
        .into_validated()
        .unwrap();

        assert_eq!(validated.legs().len(), 3);
        assert!(validated.legs().last().unwrap().is_time());
    }

    #[test]
    fn empty_block_is_valid() {
        let validated = BlockBuilder::new(date(2016, 1, 1))
            .into_validated()
            .unwrap();

        assert!(validated.is_empty());
        assert_eq!(validated.total(), None);
        assert!(validated.legs().is_empty());
    }

    #[test]
    fn consecutive_prices_without_time_fail() {
        let err = block(date(2016, 1, 8), vec![price(5.8), price(2.9), price(1.5)])
            .into_validated()
            .unwrap_err();

        assert_eq!(
            err,
            StatementError::MalformedBlock {
                date: date(2016, 1, 8),
                reason: "block must end with a time",
                items: "date 2016-01-08, price £5.80, price £2.90".into(),
            }
        );
    }

    #[test]
    fn unrepairable_start_fails() {
        let err = block(
            date(2016, 1, 8),
            vec![text("Kentish Town"), text("Bank"), price(2.4), time("10:01")],
        )
        .into_validated()
        .unwrap_err();

        assert!(matches!(err, StatementError::MalformedBlock { reason, .. }
            if reason == "item after the date must be the day's total price"));
    }

    #[test]
    fn lone_label_fails() {
        let err = block(date(2016, 1, 8), vec![text("Kentish Town")])
            .into_validated()
            .unwrap_err();
        assert!(matches!(err, StatementError::MalformedBlock { .. }));
    }

    #[test]
    fn total_without_legs_fails() {
        // The day total is never mistaken for a trailing adjustment
        let err = block(date(2016, 1, 8), vec![price(5.8)])
            .into_validated()
            .unwrap_err();
        assert!(matches!(err, StatementError::MalformedBlock { reason, .. }
            if reason == "block must end with a time"));
    }

    #[test]
    fn describe_lists_items() {
        let rendered = describe(
            date(2016, 1, 30),
            &[price(1.5), text("Bus Journey, Route 46"), time("14:49")],
        );
        assert_eq!(
            rendered,
            "date 2016-01-30, price £1.50, text 'Bus Journey, Route 46', time '14:49'"
        );
    }
}
