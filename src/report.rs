//! Result export and printing
//!
//! Both write a dated file next to each other: `triagem_<YYYY-MM-DD>.json`
//! for the export and `triagem_<YYYY-MM-DD>.txt` for the printout.

use crate::state::{ExportRecord, TriageResult};
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No result available. Classify a patient first.")]
    MissingResult,
    #[error("Could not write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not encode result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `triagem_<YYYY-MM-DD>.<extension>`
pub fn file_name(date: NaiveDate, extension: &str) -> String {
    format!("triagem_{}.{extension}", date.format("%Y-%m-%d"))
}

/// Write the result as pretty JSON into `dir`.
///
/// The JSON is encoded before the file is created, so a failure never leaves
/// a partial file behind.
pub fn export_result(
    result: Option<&TriageResult>,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let result = result.ok_or(ExportError::MissingResult)?;
    let json = serde_json::to_string_pretty(&ExportRecord::from(result))?;

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(date, "json"));
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), "result exported");
    Ok(path)
}

/// Layout applied only when printing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintStyle {
    pub width: usize,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self { width: 80 }
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Plain monochrome rendering of a result
pub fn render_print(
    result: &TriageResult,
    printed_at: DateTime<Local>,
    style: PrintStyle,
) -> String {
    let rule = "=".repeat(style.width);
    let risk = result.risk();
    let mut out = vec![
        rule.clone(),
        "TRIAGE RESULT".to_string(),
        format!("Printed {}", printed_at.format("%Y-%m-%d %H:%M")),
        rule.clone(),
        String::new(),
        format!("Classification: {}", result.classification),
        format!("Risk level:     {}", risk.label()),
        format!("Confidence:     {}", result.confidence_percent()),
        format!("Target wait:    {}", risk.wait_description()),
    ];
    if !result.timestamp.is_empty() {
        out.push(format!("Assessed at:    {}", result.timestamp));
    }

    if !result.reasoning.is_empty() {
        out.push(String::new());
        out.push("Reasoning".to_string());
        out.extend(wrap(&result.reasoning, style.width));
    }

    if !result.recommendations.is_empty() {
        out.push(String::new());
        out.push("Recommendations".to_string());
        for rec in &result.recommendations {
            for (i, line) in wrap(rec, style.width.saturating_sub(2)).into_iter().enumerate() {
                let bullet = if i == 0 { "- " } else { "  " };
                out.push(format!("{bullet}{line}"));
            }
        }
    }

    out.push(String::new());
    out.push(rule);
    out.join("\n") + "\n"
}

/// Destination for printed documents
pub trait Printer {
    fn print(&self, document: &str, date: NaiveDate) -> Result<PathBuf, ExportError>;
}

/// Spools printouts as text files in a directory
#[derive(Debug, Clone)]
pub struct FileSpooler {
    dir: PathBuf,
}

impl FileSpooler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Printer for FileSpooler {
    fn print(&self, document: &str, date: NaiveDate) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name(date, "txt"));
        fs::write(&path, document)?;
        Ok(path)
    }
}

/// Render the result with the print style and hand it to `printer`
pub fn print_result(
    result: Option<&TriageResult>,
    printer: &dyn Printer,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let result = result.ok_or(ExportError::MissingResult)?;
    let document = render_print(result, now, PrintStyle::default());
    let path = printer.print(&document, now.date_naive())?;
    tracing::info!(path = %path.display(), "result printed");
    Ok(path)
}
