//! Text and JSON reports

use dep12_core::Warning;
use serde::Serialize;

/// Warnings found in one metadata file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub warnings: Vec<Warning>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// One `<path>: <warning>` line per warning
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for warning in &report.warnings {
            out.push_str(&format!("{}: {}\n", report.path, warning));
        }
    }
    out
}

/// JSON array of `{ path, warnings }` objects
pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(reports)?;
    out.push('\n');
    Ok(out)
}
