//! Splitting the classified line stream into day blocks.

use tracing::trace;

use super::block::{BlockBuilder, Entry};
use super::classify::ClassifiedLine;
use super::error::StatementError;

/// Accumulates classified lines into day blocks.
///
/// Before the first date line the segmenter holds no block and any content
/// is an error. Each date line closes the open block (if any) and opens a
/// new one.
#[derive(Debug, Default)]
pub struct Segmenter {
    current: Option<BlockBuilder>,
}

impl Segmenter {
    /// Create a segmenter that has not yet seen a date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once a date line has been seen.
    pub fn in_block(&self) -> bool {
        self.current.is_some()
    }

    /// Feed one classified line.
    ///
    /// Returns the previous block when a date line closes it.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::UnexpectedLeadingContent`] for a price,
    /// time or label before the first date line. `line_number` and `raw`
    /// identify the line in that error.
    pub fn push(
        &mut self,
        line: ClassifiedLine,
        line_number: usize,
        raw: &str,
    ) -> Result<Option<BlockBuilder>, StatementError> {
        let entry = match line {
            ClassifiedLine::Ignorable => return Ok(None),
            ClassifiedLine::Date(date) => {
                trace!(%date, line_number, "opening day block");
                return Ok(self.current.replace(BlockBuilder::new(date)));
            }
            ClassifiedLine::Price(price) => Entry::Price(price),
            ClassifiedLine::Time(time) => Entry::Time(time),
            ClassifiedLine::Text(text) => Entry::Text(text),
        };

        match self.current.as_mut() {
            Some(block) => {
                block.push(entry);
                Ok(None)
            }
            None => Err(StatementError::UnexpectedLeadingContent {
                line_number,
                line: raw.to_string(),
            }),
        }
    }

    /// Close the open block at end of input.
    pub fn finish(self) -> Option<BlockBuilder> {
        self.current
    }
}
