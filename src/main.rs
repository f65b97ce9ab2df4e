use chartdup::report::ReportGroup;
use chartdup::{ChartFormat, NoteKind, Report};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "chartdup")]
#[command(version = "0.1.0")]
#[command(about = "Find duplicate notes in USC and SUS charts", long_about = None)]
struct Args {
    /// Chart file (.usc or .sus, optionally gzipped)
    input: PathBuf,

    /// Chart format (detected from the file extension if not specified)
    #[arg(short, long)]
    format: Option<ChartFormat>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long, requires = "json")]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status when no duplicates were found
const EXIT_CLEAN: u8 = 0;
/// Exit status when the chart has duplicate notes
const EXIT_DUPLICATES: u8 = 1;
/// Exit status when the chart could not be checked at all
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let outcome = run(&args);
    if let Err(e) = &outcome {
        log::error!("{}", e);
        eprintln!("error: {}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

/// Check the chart and print its report; `Ok(true)` means duplicates were found
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let format = match args.format {
        Some(format) => format,
        None => ChartFormat::from_path(&args.input)?,
    };
    let text = chartdup::input::read_chart_file(&args.input)?;
    let report = chartdup::check_chart(&text, format)?;

    if args.json {
        let json_string = if args.compact {
            serde_json::to_string(&report)?
        } else {
            serde_json::to_string_pretty(&report)?
        };
        println!("{}", json_string);
    } else {
        print_report(&report);
    }

    Ok(report.has_duplicates())
}

fn exit_status(outcome: &Result<bool, Box<dyn std::error::Error>>) -> u8 {
    match outcome {
        Ok(false) => EXIT_CLEAN,
        Ok(true) => EXIT_DUPLICATES,
        Err(_) => EXIT_ERROR,
    }
}

fn print_report(report: &Report) {
    if !report.has_duplicates() {
        println!("No duplicate notes found ({} notes checked).", report.note_count);
        return;
    }

    println!(
        "Duplicate notes: {} group(s), {} notes",
        report.groups.len(),
        report.duplicate_note_count()
    );
    for group in &report.groups {
        print_group(group);
    }
}

fn print_group(group: &ReportGroup) {
    let label = match group.kind {
        NoteKind::Normal => "note",
        NoteKind::SlideControl => "slide point",
    };
    println!("- {}: {}", label, group.key);

    for entry in &group.entries {
        let mut line = format!("    measure {}", entry.measure);
        if let Some(row_type) = entry.row_type {
            line.push_str(&format!(" - type: {}", row_type));
        }
        if let Some(beat) = entry.beat {
            line.push_str(&format!(", beat: {}", beat));
        }
        line.push_str(&format!(", lane: {}, width: {}", entry.lane, entry.width));
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(false)), 0);
        assert_eq!(exit_status(&Ok(true)), 1);

        let err: Box<dyn std::error::Error> =
            Box::new(chartdup::Error::UnsupportedFormat("song.txt".into()));
        assert_eq!(exit_status(&Err(err)), 2);
    }

    #[test]
    fn test_errors_differ_from_duplicates() {
        let args = Args::parse_from(["chartdup", "missing.txt"]);
        let outcome = run(&args);
        assert!(outcome.is_err());
        assert_ne!(exit_status(&outcome), exit_status(&Ok(true)));
    }
}
