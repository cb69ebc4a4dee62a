//! Output formatting

pub mod human;
pub mod json;

use crate::cli::OutputFormat;
use crate::strip::ReferenceSite;
use serde::Serialize;

/// Which command produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Remove,
    Check,
}

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub action: Action,
    pub path: String,
    /// Logging calls removed (or removable, for `check`)
    pub removed: usize,
    /// The file on disk was rewritten
    pub written: bool,
    /// Logging references left in place
    pub references: Vec<ReferenceSite>,
    /// Edited text, when it was not written back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Format a report for output
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format(report),
        OutputFormat::Json => json::format(report),
    }
}
