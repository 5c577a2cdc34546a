//! Reconciles the reports of one CI run: whatever every platform reported
//! identically moves into a synthetic `"Core"` report and is removed from
//! the per-platform reports.

use crate::s_config::SuppressionConfig;
use crate::s_report::dedup_stable;
use crate::s_types::{BuildReport, DiagnosticMessage};

pub const CORE_PLATFORM: &str = "Core";

/// How the common set is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Intersection across every report.
    #[default]
    AllReports,
    /// Intersection of the first two reports only; later reports are
    /// stripped but do not narrow the common set.
    FirstPair,
}

fn common<T: PartialEq + Clone>(lists: &[&Vec<T>]) -> Vec<T> {
    match lists.split_first() {
        Some((first, rest)) => first
            .iter()
            .filter(|item| rest.iter().all(|other| other.contains(item)))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

fn without<T: PartialEq + Clone>(items: &[T], strip: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| !strip.contains(item))
        .cloned()
        .collect()
}

/// Builds the `"Core"` report for `reports`, or `None` when there are fewer
/// than two reports to compare.
pub fn core_report(reports: &[BuildReport], mode: DiffMode) -> Option<BuildReport> {
    if reports.len() < 2 {
        return None;
    }
    let considered = match mode {
        DiffMode::AllReports => reports,
        DiffMode::FirstPair => &reports[..2],
    };

    let errors: Vec<_> = considered.iter().map(|r| &r.errors).collect();
    let warnings: Vec<_> = considered.iter().map(|r| &r.warnings).collect();
    let tests: Vec<_> = considered.iter().map(|r| &r.unit_test_failures).collect();

    Some(BuildReport {
        platform: CORE_PLATFORM.to_string(),
        errors: common(&errors),
        warnings: common(&warnings),
        unit_test_failures: common(&tests),
        config: SuppressionConfig::default(),
    })
}

/// Returns a copy of `report` without anything present in `core`.
pub fn strip_report(report: &BuildReport, core: &BuildReport) -> BuildReport {
    BuildReport {
        platform: report.platform.clone(),
        errors: without(&report.errors, &core.errors),
        warnings: without(&report.warnings, &core.warnings),
        unit_test_failures: without(&report.unit_test_failures, &core.unit_test_failures),
        config: report.config.clone(),
    }
}

/// Differences reports using the given mode.
pub fn diff_with(reports: &[BuildReport], mode: DiffMode) -> Vec<BuildReport> {
    let Some(core) = core_report(reports, mode) else {
        return reports.to_vec();
    };
    log::info!(
        "Core report across {} platform(s): {} error(s), {} warning(s), {} test failure(s)",
        reports.len(),
        core.errors.len(),
        core.warnings.len(),
        core.unit_test_failures.len()
    );

    let mut result: Vec<BuildReport> = reports.iter().map(|r| strip_report(r, &core)).collect();
    result.push(core);
    result
}

/// Stripped per-platform reports followed by the `"Core"` report, computed
/// over every input report.
///
/// # Example
/// ```
/// use buildlog_sift::{diff, BuildReport, DiagnosticMessage};
///
/// let shared = DiagnosticMessage::new("/src/Shared.swift", 3, 1, "unused import");
/// let mut ios = BuildReport::empty("iOS");
/// let mut mac = BuildReport::empty("macOS");
/// ios.warnings.push(shared.clone());
/// mac.warnings.push(shared.clone());
///
/// let result = diff(&[ios, mac]);
/// assert_eq!(result.len(), 3);
/// assert!(result[0].warnings.is_empty() && result[1].warnings.is_empty());
/// assert_eq!(result[2].platform, "Core");
/// assert_eq!(result[2].warnings, vec![shared]);
/// ```
pub fn diff(reports: &[BuildReport]) -> Vec<BuildReport> {
    diff_with(reports, DiffMode::AllReports)
}

/// Every warning across `reports`, each listed once.
pub fn union_warnings(reports: &[BuildReport]) -> Vec<DiagnosticMessage> {
    dedup_stable(
        reports
            .iter()
            .flat_map(|r| r.warnings.iter().cloned())
            .collect(),
    )
}
