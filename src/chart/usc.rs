//! USC (JSON) chart parsing
//!
//! A USC document looks like `{"usc": {"objects": [...]}}`. Every object
//! is classified at the boundary into a placed note, a slide with its
//! connection points, or something that carries no note position.

use super::key::UscKey;
use super::NoteKind;
use crate::detect::PositionKeyed;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Object kinds that have a beat but never represent a note
const MARKER_KINDS: &[&str] = &["bpm", "timeScaleGroup"];

/// Beats per measure
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// A note or slide connection point read from a USC chart
#[derive(Debug, Clone, PartialEq)]
pub struct UscNote {
    pub beat: f64,
    pub lane: f64,
    pub size: f64,
    pub kind: NoteKind,
}

impl UscNote {
    /// Bar number shown to the user
    pub fn measure(&self) -> i64 {
        (self.beat / BEATS_PER_MEASURE).floor() as i64
    }

    /// Width in display units (USC stores half widths)
    pub fn display_width(&self) -> f64 {
        self.size * 2.0
    }
}

impl PositionKeyed for UscNote {
    type Key = UscKey;

    fn position_key(&self) -> UscKey {
        UscKey::new(self.beat, self.lane, self.size)
    }
}

/// Loose view of one entry of `usc.objects`
#[derive(Debug, Deserialize)]
struct RawObject {
    #[serde(rename = "type")]
    kind: Option<String>,
    beat: Option<f64>,
    lane: Option<f64>,
    size: Option<f64>,
    connections: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    beat: f64,
    lane: f64,
    size: f64,
}

impl RawObject {
    fn placement(&self) -> Option<Placement> {
        Some(Placement {
            beat: self.beat?,
            lane: self.lane?,
            size: self.size?,
        })
    }
}

/// A chart object after validation
#[derive(Debug, PartialEq)]
enum ChartObject {
    Note(Placement),
    Slide(Vec<Placement>),
    Skip,
}

impl From<RawObject> for ChartObject {
    fn from(raw: RawObject) -> Self {
        if let Some(kind) = raw.kind.as_deref() {
            if MARKER_KINDS.contains(&kind) {
                return ChartObject::Skip;
            }
        }

        if let Some(connections) = &raw.connections {
            let points = connections
                .iter()
                .filter_map(|point| decode_object(point)?.placement())
                .collect();
            return ChartObject::Slide(points);
        }

        match raw.placement() {
            Some(placement) => ChartObject::Note(placement),
            None => ChartObject::Skip,
        }
    }
}

/// Decode a single JSON object, or `None` if it doesn't fit the loose shape
fn decode_object(value: &Value) -> Option<RawObject> {
    if !value.is_object() {
        return None;
    }
    match RawObject::deserialize(value) {
        Ok(raw) => Some(raw),
        Err(e) => {
            debug!("Skipping USC object with unexpected field types: {}", e);
            None
        }
    }
}

/// Parse USC chart text into notes in file order
///
/// Slide connection points are emitted in place, right after the notes
/// that precede their slide.
pub fn parse(text: &str) -> Result<Vec<UscNote>> {
    let document: Value = serde_json::from_str(text).map_err(Error::MalformedInput)?;

    let body = document
        .get("usc")
        .filter(|usc| usc.is_object())
        .ok_or_else(|| Error::UnexpectedSchema("missing top-level `usc` object".into()))?;
    let objects = body
        .get("objects")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::UnexpectedSchema("`usc.objects` is not an array".into()))?;

    let mut notes = Vec::new();
    for (i, entry) in objects.iter().enumerate() {
        let Some(raw) = decode_object(entry) else {
            debug!("Skipping USC object #{}: not a chart object", i);
            continue;
        };

        match ChartObject::from(raw) {
            ChartObject::Note(p) => notes.push(UscNote {
                beat: p.beat,
                lane: p.lane,
                size: p.size,
                kind: NoteKind::Normal,
            }),
            ChartObject::Slide(points) => {
                notes.extend(points.into_iter().map(|p| UscNote {
                    beat: p.beat,
                    lane: p.lane,
                    size: p.size,
                    kind: NoteKind::SlideControl,
                }));
            }
            ChartObject::Skip => debug!("Skipping USC object #{}: no note position", i),
        }
    }

    Ok(notes)
}
