//! Chart formats and the duplicate check pipeline

pub mod key;
pub mod sus;
pub mod usc;

use crate::detect::find_duplicates;
use crate::error::{Error, Result};
use crate::report::Report;
use log::info;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported chart formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// JSON-based `.usc` charts
    Usc,
    /// Fixed-column text `.sus` charts
    Sus,
}

impl ChartFormat {
    /// File extension (without dot)
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Usc => "usc",
            ChartFormat::Sus => "sus",
        }
    }

    /// Match a file extension, ignoring ASCII case
    pub fn from_extension(ext: &str) -> Option<Self> {
        [ChartFormat::Usc, ChartFormat::Sus]
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.extension()))
    }

    /// Pick the format from a file name, looking through a trailing `.gz`
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut ext = path.extension().and_then(|e| e.to_str());
        if ext.is_some_and(|e| e.eq_ignore_ascii_case("gz")) {
            ext = path
                .file_stem()
                .map(Path::new)
                .and_then(|stem| stem.extension())
                .and_then(|e| e.to_str());
        }
        ext.and_then(Self::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }
}

impl FromStr for ChartFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim_start_matches('.'))
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// What a parsed note stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteKind {
    /// A placed note
    Normal,
    /// A control point along a slide
    SlideControl,
}

/// Check chart text for notes placed on the same position
///
/// Plain notes and slide connection points are checked separately; a note
/// sitting on a slide point is not a duplicate.
pub fn check_chart(raw: &str, format: ChartFormat) -> Result<Report> {
    let report = match format {
        ChartFormat::Usc => {
            let (normal, slide): (Vec<_>, Vec<_>) = usc::parse(raw)?
                .into_iter()
                .partition(|note| note.kind == NoteKind::Normal);

            let mut report = Report::new(format, normal.len() + slide.len());
            report.add_groups(NoteKind::Normal, &find_duplicates(normal));
            report.add_groups(NoteKind::SlideControl, &find_duplicates(slide));
            report
        }
        ChartFormat::Sus => {
            let notes = sus::parse(raw);

            let mut report = Report::new(format, notes.len());
            report.add_groups(NoteKind::Normal, &find_duplicates(notes));
            report
        }
    };

    info!(
        "Checked {} {} notes: {} duplicate group(s)",
        report.note_count,
        format,
        report.groups.len()
    );
    Ok(report)
}
