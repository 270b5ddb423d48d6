use super::lookup::AccountReport;
use super::{Error, Result};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

const FIELDS: [&str; 4] = ["user_id", "created", "last_online", "last_game"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unsupported output format '{}'", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        })
    }
}

/// Writes the report to `<username>.<format>` in the working directory,
/// overwriting anything already there, and returns the path written.
pub fn write(report: &AccountReport, username: &str, format: OutputFormat) -> Result<PathBuf> {
    write_to(PathBuf::from(file_name(username, format)), report, format)
}

fn file_name(username: &str, format: OutputFormat) -> String {
    format!("{}.{}", username, format)
}

fn write_to(path: PathBuf, report: &AccountReport, format: OutputFormat) -> Result<PathBuf> {
    let contents = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Csv => render_csv(report),
    };
    fs::write(&path, contents).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "report written");
    Ok(path)
}

fn render_csv(report: &AccountReport) -> String {
    let values = [
        report.user_id.to_string(),
        report.created.clone(),
        report.last_online.clone(),
        report.last_game.clone(),
    ];
    let row: Vec<String> = values.iter().map(|value| csv_field(value)).collect();
    format!("{}\n{}\n", FIELDS.join(","), row.join(","))
}

// Quoting per RFC 4180: only fields holding the separator, a quote or a line
// break get wrapped, with inner quotes doubled.
fn csv_field(value: &str) -> String {
    if value.chars().any(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
