//! Position keys used to decide whether two notes sit on the same spot

use num_rational::Ratio;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A JSON number compared by exact value
///
/// Equality and hashing go through the bit pattern, so two positions are
/// equal exactly when the chart wrote the same number. `-0.0` is folded
/// into `0.0` on construction.
#[derive(Debug, Clone, Copy)]
pub struct Position(f64);

impl Position {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a USC note: raw beat, lane and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UscKey {
    pub beat: Position,
    pub lane: Position,
    pub size: Position,
}

impl UscKey {
    pub fn new(beat: f64, lane: f64, size: f64) -> Self {
        Self {
            beat: Position::new(beat),
            lane: Position::new(lane),
            size: Position::new(size),
        }
    }
}

impl fmt::Display for UscKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "beat {}, lane {}, size {}",
            self.beat, self.lane, self.size
        )
    }
}

/// Identity of a SUS note, built from the row's raw coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SusKey {
    pub measure: u32,
    pub row_type: char,
    pub lane: char,
    pub width: u8,
    /// Quarter-note offset inside the measure, in [0, 4)
    pub beat_fraction: Ratio<u32>,
}

impl fmt::Display for SusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "measure {}, type {}, lane {}, width {}, beat {}",
            self.measure,
            self.row_type,
            self.lane,
            self.width,
            ratio_to_f64(self.beat_fraction)
        )
    }
}

/// Convert an exact beat fraction to a float for display
pub fn ratio_to_f64(ratio: Ratio<u32>) -> f64 {
    *ratio.numer() as f64 / *ratio.denom() as f64
}
