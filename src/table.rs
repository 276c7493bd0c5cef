//! Fixed-width name table: `N` rows of exactly `row_width` bytes, row `i`
//! holding entry `i`'s name right-padded with ASCII space.
//!
//! Trailing spaces in an original name are indistinguishable from padding and
//! are always stripped on decode.  This is a documented lossy property of the
//! format; no length field exists to recover them.

use crate::entry::Entry;
use crate::error::{Error, Result};

/// Padding byte for short rows.
pub const PAD: u8 = b' ';

/// Encode canonicalized entry names into the raw table bytes.
///
/// Names must already be canonicalized: each row is fixed width, so a name is
/// clipped at `row_width` bytes if it somehow still exceeds it (same behavior
/// as the truncation step, kept here so the row invariant can never break).
pub fn encode_names(entries: &[Entry], row_width: usize) -> Vec<u8> {
    let mut table = Vec::with_capacity(entries.len() * row_width);
    for entry in entries {
        let bytes = entry.name.as_bytes();
        let take = bytes.len().min(row_width);
        table.extend_from_slice(&bytes[..take]);
        table.resize(table.len() + (row_width - take), PAD);
    }
    table
}

/// Decode the raw table back into names, stripping trailing space padding.
///
/// Fails with [`Error::CorruptArchive`] if the table size is not a multiple
/// of `row_width`.  Rows that are not valid UTF-8 decode lossily; the
/// collector only produces UTF-8 names, so this triggers only on containers
/// written by foreign tools.
pub fn decode_names(table: &[u8], row_width: usize) -> Result<Vec<String>> {
    if row_width == 0 || table.len() % row_width != 0 {
        return Err(Error::corrupt(format!(
            "name table size {} is not a multiple of row width {}",
            table.len(),
            row_width
        )));
    }
    Ok(table
        .chunks(row_width)
        .map(|row| {
            String::from_utf8_lossy(row)
                .trim_end_matches(' ')
                .to_owned()
        })
        .collect())
}
