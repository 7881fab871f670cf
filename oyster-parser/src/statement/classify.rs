//! Line classification.
//!
//! Extracted statement text is noisy: the same kind of entry shows up in
//! slightly different shapes depending on the journey type (bus or tube,
//! single time or time range). Classification therefore uses structural
//! shape tests (separator counts plus a digit-only residue) rather than
//! strict format parsing.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Price, PriceOutOfRange};

use super::config::ParserConfig;

/// First decimal-looking substring, e.g. the `2.90` in `£2.90`.
static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+\.\d+)").expect("price pattern is valid"));

/// A single statement line, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedLine {
    /// Blank line or known boilerplate
    Ignorable,
    /// Start of a day
    Date(NaiveDate),
    /// A charge: the day's total, a leg fare, or an adjustment
    Price(Price),
    /// A time or time range, kept as written
    Time(String),
    /// Anything else: station names, bus routes
    Text(String),
}

/// Why a line is not a price.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PriceError {
    /// No `digits.digits` substring on the line
    #[error("not a price")]
    NotAPrice,

    /// A decimal was found but cannot be a single charge
    #[error(transparent)]
    OutOfRange(#[from] PriceOutOfRange),
}

/// Returns true if the line starts with a configured boilerplate prefix.
pub fn classify_ignorable(line: &str, config: &ParserConfig) -> bool {
    config.is_ignorable(line)
}

/// Extract the first decimal amount on the line.
///
/// # Examples
///
/// ```
/// use oyster_parser::statement::parse_price;
///
/// assert_eq!(parse_price("£2.90 adjustment").unwrap().amount(), 2.90);
/// assert!(parse_price("Kentish Town").is_err());
/// ```
pub fn parse_price(line: &str) -> Result<Price, PriceError> {
    let matched = PRICE_PATTERN.find(line).ok_or(PriceError::NotAPrice)?;
    // digits.digits always parses as f64
    let amount: f64 = matched
        .as_str()
        .parse()
        .map_err(|_| PriceError::NotAPrice)?;
    Ok(Price::new(amount)?)
}

/// Returns true if the line has exactly two '/' and only digits besides.
pub fn is_date_like(line: &str) -> bool {
    line.matches('/').count() == 2 && is_digit_residue(line, &['/'])
}

/// Parse a day-first `DD/MM/YYYY` date.
///
/// Two-digit years are read as 20YY. Returns `None` for anything that is
/// not a real calendar date.
pub fn parse_date(line: &str) -> Option<NaiveDate> {
    let mut parts = line.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = match year_str.len() {
        2 => 2000 + year_str.parse::<i32>().ok()?,
        4 => year_str.parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns true if the line looks like a time or a time range.
///
/// Accepts `"12:33 - 12:48"`, `"--:-- - 23:47"` (unknown start) and
/// `"18:24"`.
pub fn is_time_like(line: &str) -> bool {
    match line.matches(':').count() {
        2 => line.contains('-') && is_digit_residue(line, &[':', '-', ' ']),
        1 => is_digit_residue(line, &[':']),
        _ => false,
    }
}

/// Returns true if removing `separators` leaves a non-empty run of digits.
fn is_digit_residue(line: &str, separators: &[char]) -> bool {
    let mut residue = line.chars().filter(|c| !separators.contains(c)).peekable();
    residue.peek().is_some() && residue.all(|c| c.is_ascii_digit())
}

/// Classify a trimmed line.
///
/// Checks run in a fixed order (ignorable, date, price, time, text) and
/// the first match wins. A date-shaped line that is not a real date falls
/// through to the later checks.
///
/// # Errors
///
/// Returns `PriceOutOfRange` if the line carries a decimal amount of £100
/// or more. That means the price pattern matched something unexpected and
/// the input cannot be trusted.
pub fn classify(line: &str, config: &ParserConfig) -> Result<ClassifiedLine, PriceOutOfRange> {
    if line.is_empty() || classify_ignorable(line, config) {
        return Ok(ClassifiedLine::Ignorable);
    }

    if is_date_like(line) {
        if let Some(date) = parse_date(line) {
            return Ok(ClassifiedLine::Date(date));
        }
    }

    match parse_price(line) {
        Ok(price) => return Ok(ClassifiedLine::Price(price)),
        Err(PriceError::OutOfRange(e)) => return Err(e),
        Err(PriceError::NotAPrice) => {}
    }

    if is_time_like(line) {
        return Ok(ClassifiedLine::Time(line.to_string()));
    }

    Ok(ClassifiedLine::Text(line.to_string()))
}

impl fmt::Display for ClassifiedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifiedLine::Ignorable => write!(f, "ignorable"),
            ClassifiedLine::Date(date) => write!(f, "date {date}"),
            ClassifiedLine::Price(price) => write!(f, "price {price}"),
            ClassifiedLine::Time(time) => write!(f, "time '{time}'"),
            ClassifiedLine::Text(text) => write!(f, "text '{text}'"),
        }
    }
}
