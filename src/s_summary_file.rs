//! Reading and writing `.buildReport.json` documents.

use crate::s_error::Result;
use crate::s_types::BuildReport;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_EXTENSION: &str = "buildReport.json";

/// Pretty JSON with keys in sorted order, so reports diff cleanly.
pub fn to_json(report: &BuildReport) -> Result<String> {
    // serde_json's map type is ordered by key unless `preserve_order` is on
    let value = serde_json::to_value(report)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn from_json(content: &str) -> Result<BuildReport> {
    Ok(serde_json::from_str(content)?)
}

/// `My App` becomes `My_App.buildReport.json`; an unknown platform becomes
/// `unknown.buildReport.json`.
pub fn report_file_name(platform: &str) -> String {
    let stem = if platform.trim().is_empty() {
        "unknown".to_string()
    } else {
        platform.trim().replace(' ', "_")
    };
    format!("{}.{}", stem, REPORT_EXTENSION)
}

/// Writes the report into `dir`, creating it if needed, and returns the file path.
pub fn write_report(report: &BuildReport, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(&report.platform));
    fs::write(&path, to_json(report)?)?;
    log::debug!("Saved report for '{}' at {}", report.platform, path.display());
    Ok(path)
}

pub fn read_report(path: &Path) -> Result<BuildReport> {
    let content = fs::read_to_string(path)?;
    from_json(&content)
}
