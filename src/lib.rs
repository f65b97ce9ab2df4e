pub mod chart;
pub mod detect;
pub mod error;
pub mod input;
pub mod report;

pub use chart::{check_chart, ChartFormat, NoteKind};
pub use error::Error;
pub use report::Report;
