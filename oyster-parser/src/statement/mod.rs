//! Oyster statement parsing.
//!
//! Turns the text extracted from an Oyster card PDF statement into journey
//! records. The pipeline runs in four steps:
//!
//! 1. each trimmed line is classified (ignorable, date, price, time, label);
//! 2. the stream is cut into day blocks at every date line;
//! 3. each block has its known extraction defects repaired and its shape
//!    checked;
//! 4. each block's legs are walked to produce the records.
//!
//! Any structural violation aborts the document. The parser is tuned to one
//! statement format and cannot safely guess on a mismatch.

mod block;
mod classify;
mod config;
mod error;
mod extract;
mod segment;


pub use block::{BlockBuilder, DayBlock, Entry};
pub use classify::{
    ClassifiedLine, PriceError, classify, classify_ignorable, is_date_like, is_time_like,
    parse_date, parse_price,
};
pub use config::{ConfigError, ParserConfig};
pub use error::StatementError;
pub use extract::extract_journeys;
pub use segment::Segmenter;

use tracing::debug;

use crate::domain::JourneyRecord;

/// Parse the text of one statement into journey records.
///
/// Records come out in statement order: day blocks in the order they
/// appear, legs within a day in the order they appear.
///
/// # Examples
///
/// ```
/// use oyster_parser::statement::{ParserConfig, parse_statement};
///
/// let text = "30/01/2016\n£1.50\nBus Journey, Route 46\n£1.50\n14:49\n";
/// let journeys = parse_statement(text, &ParserConfig::default()).unwrap();
///
/// assert_eq!(journeys.len(), 1);
/// assert_eq!(journeys[0].from, "Bus Journey, Route 46");
/// assert!(!journeys[0].is_train);
/// ```
pub fn parse_statement(
    text: &str,
    config: &ParserConfig,
) -> Result<Vec<JourneyRecord>, StatementError> {
    let mut segmenter = Segmenter::new();
    let mut journeys = Vec::new();
    let mut blocks = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let line_number = idx + 1;

        let classified = classify(line, config).map_err(|e| StatementError::PriceOutOfRange {
            line_number,
            line: line.to_string(),
            amount: e.amount,
        })?;

        if let Some(block) = segmenter.push(classified, line_number, line)? {
            blocks += 1;
            journeys.extend(extract_journeys(&block.into_validated()?)?);
        }
    }

    if let Some(block) = segmenter.finish() {
        blocks += 1;
        journeys.extend(extract_journeys(&block.into_validated()?)?);
    }

    debug!(blocks, journeys = journeys.len(), "parsed statement");

    Ok(journeys)
}

/// Parse several statements and concatenate their records in input order.
///
/// Each statement is parsed independently. Fails on the first statement
/// that fails.
pub fn parse_statements<I, S>(
    texts: I,
    config: &ParserConfig,
) -> Result<Vec<JourneyRecord>, StatementError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut journeys = Vec::new();
    for text in texts {
        journeys.extend(parse_statement(text.as_ref(), config)?);
    }
    Ok(journeys)
}
