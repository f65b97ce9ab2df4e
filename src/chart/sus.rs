//! SUS (fixed-column text) chart parsing
//!
//! Data rows look like `#mmmTL:dddd...` where `mmm` is the measure, `T` the
//! row type, `L` the lane and the data is a run of two-character tokens
//! spread evenly across the measure. Everything else (headers, comments,
//! `#BPM01:` style definitions) is ignored, as are rows that don't split
//! cleanly.

use super::key::SusKey;
use crate::detect::PositionKeyed;
use log::debug;
use num_rational::Ratio;

/// Quarter notes per measure
pub const QUARTERS_PER_MEASURE: u32 = 4;

/// Token meaning "no note at this step"
const EMPTY_TOKEN: [u8; 2] = *b"00";

/// Offset of the `:` separating the row header from its data
const SEPARATOR_OFFSET: usize = 6;

/// A note read from one token of a SUS data row
#[derive(Debug, Clone, PartialEq)]
pub struct SusNote {
    pub measure: u32,
    pub row_type: char,
    pub lane: char,
    /// First token character; not part of the note's identity
    pub note_type: char,
    pub width: u8,
    /// Quarter-note offset inside the measure, in [0, 4)
    pub beat_fraction: Ratio<u32>,
}

impl PositionKeyed for SusNote {
    type Key = SusKey;

    fn position_key(&self) -> SusKey {
        SusKey {
            measure: self.measure,
            row_type: self.row_type,
            lane: self.lane,
            width: self.width,
            beat_fraction: self.beat_fraction,
        }
    }
}

/// Header fields of a data row
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowHeader {
    measure: u32,
    row_type: char,
    lane: char,
}

/// Split a trimmed line into its header and data part, if it is a data row
fn split_row(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'#') || bytes.get(SEPARATOR_OFFSET) != Some(&b':') {
        return None;
    }
    // Both cut points sit next to ASCII bytes, so they are char boundaries
    Some((&line[1..SEPARATOR_OFFSET], &line[SEPARATOR_OFFSET + 1..]))
}

fn parse_header(header: &str) -> Option<RowHeader> {
    let bytes = header.as_bytes();
    if bytes.len() != 5 || !bytes.is_ascii() {
        return None;
    }
    if !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(RowHeader {
        measure: header[..3].parse().ok()?,
        row_type: bytes[3] as char,
        lane: bytes[4] as char,
    })
}

/// Break the data part into two-byte tokens, or `None` if it doesn't split evenly
fn tokenize(data: &str) -> Option<Vec<[u8; 2]>> {
    let bytes = data.as_bytes();
    if bytes.is_empty() || bytes.len() % 2 != 0 || !bytes.is_ascii() {
        return None;
    }
    Some(bytes.chunks_exact(2).map(|t| [t[0], t[1]]).collect())
}

fn parse_row(header: RowHeader, tokens: &[[u8; 2]], line_no: usize) -> Vec<SusNote> {
    let count = tokens.len() as u32;
    let mut notes = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        if *token == EMPTY_TOKEN {
            continue;
        }
        let Some(width) = (token[1] as char).to_digit(36) else {
            debug!(
                "Line {}: skipping token {:?} with unreadable width",
                line_no,
                String::from_utf8_lossy(token)
            );
            continue;
        };
        notes.push(SusNote {
            measure: header.measure,
            row_type: header.row_type,
            lane: header.lane,
            note_type: token[0] as char,
            width: width as u8,
            beat_fraction: Ratio::new(index as u32 * QUARTERS_PER_MEASURE, count),
        });
    }

    notes
}

/// Parse SUS chart text into notes in file order
///
/// Never fails: lines that aren't well-formed data rows are skipped.
pub fn parse(text: &str) -> Vec<SusNote> {
    let mut notes = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let Some((header, data)) = split_row(line.trim()) else {
            continue;
        };
        let Some(header) = parse_header(header) else {
            debug!("Line {}: not a note row, skipping", line_no);
            continue;
        };
        let Some(tokens) = tokenize(data) else {
            debug!("Line {}: note data doesn't split into pairs, skipping", line_no);
            continue;
        };
        notes.extend(parse_row(header, &tokens, line_no));
    }

    notes
}
