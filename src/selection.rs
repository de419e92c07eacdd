//! Turning a line of user input into one of the listed items.
//!
//! Parsing and bounds checking are separate steps with separate errors, so a
//! caller may re-prompt on either.

use crate::{Error, Result};

/// Parses a zero-based index, ignoring surrounding whitespace.
pub fn parse_index(line: &str) -> Result<usize> {
    let trimmed = line.trim();
    trimmed
        .parse()
        .map_err(|_| Error::InvalidInput(trimmed.to_string()))
}

/// Gets the item at `index`.
pub fn select<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or(Error::OutOfRange {
        index,
        len: items.len(),
    })
}

/// Parses `line` and selects the matching item.
pub fn choose<'a, T>(items: &'a [T], line: &str) -> Result<&'a T> {
    select(items, parse_index(line)?)
}
