//! Display-ready duplicate reports

use crate::chart::key::ratio_to_f64;
use crate::chart::sus::SusNote;
use crate::chart::usc::UscNote;
use crate::chart::{ChartFormat, NoteKind};
use crate::detect::DuplicateGroup;
use serde::Serialize;
use std::fmt;

/// Result of checking one chart
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub format: ChartFormat,
    /// Number of notes the parser produced
    pub note_count: usize,
    /// Duplicate groups, plain notes before slide connection points
    pub groups: Vec<ReportGroup>,
}

/// One set of notes sharing a position
#[derive(Debug, Clone, Serialize)]
pub struct ReportGroup {
    pub kind: NoteKind,
    pub key: String,
    pub entries: Vec<ReportEntry>,
}

/// One member of a duplicate group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub measure: i64,
    pub lane: Lane,
    /// Width in display units
    pub width: f64,
    /// USC: raw beat. SUS: quarter-note offset inside the measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_type: Option<char>,
}

/// Lane as written in the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lane {
    /// USC lane position
    Position(f64),
    /// SUS lane code character
    Code(char),
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Position(lane) => write!(f, "{}", lane),
            Lane::Code(code) => write!(f, "{}", code),
        }
    }
}

impl Report {
    pub fn new(format: ChartFormat, note_count: usize) -> Self {
        Self {
            format,
            note_count,
            groups: Vec::new(),
        }
    }

    /// Append detected groups of one note kind
    pub fn add_groups<K, T>(&mut self, kind: NoteKind, groups: &[DuplicateGroup<K, T>])
    where
        K: fmt::Display,
        for<'a> ReportEntry: From<&'a T>,
    {
        self.groups.extend(groups.iter().map(|group| ReportGroup {
            kind,
            key: group.key.to_string(),
            entries: group.entries.iter().map(ReportEntry::from).collect(),
        }));
    }

    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Total notes involved in any duplicate group
    pub fn duplicate_note_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }
}

impl From<&UscNote> for ReportEntry {
    fn from(note: &UscNote) -> Self {
        Self {
            measure: note.measure(),
            lane: Lane::Position(note.lane),
            width: note.display_width(),
            beat: Some(note.beat),
            row_type: None,
        }
    }
}

impl From<&SusNote> for ReportEntry {
    fn from(note: &SusNote) -> Self {
        Self {
            measure: i64::from(note.measure),
            lane: Lane::Code(note.lane),
            width: f64::from(note.width),
            beat: Some(ratio_to_f64(note.beat_fraction)),
            row_type: Some(note.row_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::find_duplicates;
    use num_rational::Ratio;

    fn usc(beat: f64, lane: f64, size: f64) -> UscNote {
        UscNote {
            beat,
            lane,
            size,
            kind: NoteKind::Normal,
        }
    }

    #[test]
    fn test_usc_entries() {
        let groups = find_duplicates(vec![usc(9.0, 2.0, 1.5), usc(9.0, 2.0, 1.5)]);
        let mut report = Report::new(ChartFormat::Usc, 2);
        report.add_groups(NoteKind::Normal, &groups);

        assert!(report.has_duplicates());
        assert_eq!(report.duplicate_note_count(), 2);
        let group = &report.groups[0];
        assert_eq!(group.key, "beat 9, lane 2, size 1.5");
        for entry in &group.entries {
            assert_eq!(entry.measure, 2);
            assert_eq!(entry.width, 3.0);
            assert_eq!(entry.lane, Lane::Position(2.0));
        }
    }

    #[test]
    fn test_sus_entry() {
        let note = SusNote {
            measure: 12,
            row_type: '1',
            lane: 'a',
            note_type: '1',
            width: 4,
            beat_fraction: Ratio::new(3, 1),
        };
        let entry = ReportEntry::from(&note);
        assert_eq!(entry.measure, 12);
        assert_eq!(entry.width, 4.0);
        assert_eq!(entry.lane.to_string(), "a");
        assert_eq!(entry.row_type, Some('1'));
        assert_eq!(entry.beat, Some(3.0));
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(ChartFormat::Sus, 0);
        assert!(!report.has_duplicates());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["groups"], serde_json::json!([]));
        assert_eq!(json["format"], "sus");
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = ReportEntry::from(&usc(4.0, -1.0, 1.0));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"measure": 1, "lane": -1.0, "width": 2.0, "beat": 4.0})
        );
    }
}
