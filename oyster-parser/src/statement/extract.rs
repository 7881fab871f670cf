//! Journey extraction from validated day blocks.

use crate::domain::JourneyRecord;

use super::block::{DayBlock, Entry, malformed};
use super::error::StatementError;

/// Items in a rail leg: origin, destination, fare, time range.
const RAIL_LEG_LEN: usize = 4;

/// Items in a single-label leg: label, fare, time.
const SINGLE_LEG_LEN: usize = 3;

/// Walk a block's legs and produce one record per leg.
///
/// Each leg starts with a label. Two consecutive labels make a rail leg
/// (origin and destination); a single label is a bus or other leg with no
/// destination.
///
/// # Errors
///
/// Returns [`StatementError::MalformedBlock`] if a leg does not start with a
/// label or runs past the end of the block.
pub fn extract_journeys(block: &DayBlock) -> Result<Vec<JourneyRecord>, StatementError> {
    let date = block.date();
    let legs = block.legs();
    let mut journeys = Vec::new();
    let mut idx = 0;

    while idx < legs.len() {
        let from = legs[idx]
            .as_text()
            .ok_or_else(|| fail(block, "expected a label at the start of a leg"))?;

        let (record, stride) = match legs.get(idx + 1).and_then(Entry::as_text) {
            Some(to) => (JourneyRecord::train(date, from, to), RAIL_LEG_LEN),
            None => (JourneyRecord::single(date, from), SINGLE_LEG_LEN),
        };

        if idx + stride > legs.len() {
            return Err(fail(block, "leg runs past the end of the block"));
        }

        journeys.push(record);
        idx += stride;
    }

    Ok(journeys)
}

fn fail(block: &DayBlock, reason: &'static str) -> StatementError {
    let mut entries = Vec::with_capacity(block.legs().len() + 1);
    entries.extend(block.total().map(Entry::Price));
    entries.extend(block.legs().iter().cloned());
    malformed(block.date(), reason, &entries)
}
