//! Drives one build log through normalization, classification, extraction,
//! suppression and de-duplication into a [`BuildReport`].

use crate::s_config::SuppressionConfig;
use crate::s_dialect::{Dialect, LineClass};
use crate::s_extract::{extract_diagnostic, extract_test_failure};
use crate::s_normalize::normalize;
use crate::s_suppress::{keep_error, keep_test, keep_warning};
use crate::s_types::{BuildReport, BuildStatus, DiagnosticMessage, TestFailure};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::hash::Hash;

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Regular expression failed '{}': {}", pattern, e);
            None
        }
    }
}

/// `| scheme | My App |` row of the fastlane summary table.
static FASTLANE_SCHEME_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"(?im)^\s*\|\s*scheme\s*\|\s*([^|\n]+?)\s*\|"));

/// `-scheme App` or `-scheme "My App"` on the xcodebuild command line.
static XCODEBUILD_SCHEME_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r#"(?i)-scheme\s+(?:"([^"]+)"|(\S+))"#));

/// `[12:34:56]: Exit status: 65`; the timestamp is optional. A marker with
/// no digits after it still counts, with an unknown code.
static EXIT_STATUS_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"(?i)(?:\[\d+:\d+:\d+\]:\s*)?Exit status:[ \t]*(-?\d+)?"));

/// Keeps the first occurrence of every item.
pub fn dedup_stable<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Finds the scheme or target the log was built for, if it says.
pub fn detect_platform(content: &str, dialect: Dialect) -> Option<String> {
    let caps = match dialect {
        Dialect::Fastlane => FASTLANE_SCHEME_REGEX.as_ref()?.captures(content)?,
        Dialect::Xcodebuild => XCODEBUILD_SCHEME_REGEX.as_ref()?.captures(content)?,
    };
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let collapsed = name.split_whitespace().collect::<Vec<&str>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Reads the build tool's own exit status marker. No marker means the tool
/// finished normally.
pub fn detect_status(content: &str) -> BuildStatus {
    let Some(regex) = EXIT_STATUS_REGEX.as_ref() else {
        return BuildStatus::Success;
    };
    match regex.captures(content) {
        Some(caps) => BuildStatus::Failure {
            exit_code: caps
                .get(1)
                .and_then(|code| code.as_str().parse::<i32>().ok())
                .unwrap_or(-1),
        },
        None => BuildStatus::Success,
    }
}

/// Parses a fully loaded build log.
///
/// # Example
/// ```
/// use buildlog_sift::{parse, BuildStatus, Dialect, SuppressionConfig};
///
/// let log = "❌ /repo/A.swift:10:2: error: types don't match\n[10:00:00]: Exit status: 65\n";
/// let (report, status) = parse(log, &SuppressionConfig::default(), Dialect::Fastlane);
/// assert_eq!(report.errors.len(), 1);
/// assert_eq!(status, BuildStatus::Failure { exit_code: 65 });
/// ```
pub fn parse(content: &str, config: &SuppressionConfig, dialect: Dialect) -> (BuildReport, BuildStatus) {
    let normalized = normalize(content);

    let mut errors: Vec<DiagnosticMessage> = Vec::new();
    let mut warnings: Vec<DiagnosticMessage> = Vec::new();
    let mut tests: Vec<TestFailure> = Vec::new();

    for line in normalized.lines() {
        match dialect.classify(line) {
            LineClass::Error => {
                if let Some(error) = extract_diagnostic(line) {
                    if keep_error(config, &error) {
                        errors.push(error);
                    }
                }
            }
            LineClass::Warning => {
                if let Some(warning) = extract_diagnostic(line) {
                    if keep_warning(config, &warning) {
                        warnings.push(warning);
                    }
                }
            }
            LineClass::TestFailure => {
                if let Some(failure) = extract_test_failure(line, dialect) {
                    if keep_test(config, &failure) {
                        tests.push(failure);
                    }
                }
            }
            LineClass::Other => {}
        }
    }

    let report = BuildReport {
        platform: detect_platform(&normalized, dialect).unwrap_or_default(),
        errors: dedup_stable(errors),
        warnings: dedup_stable(warnings),
        unit_test_failures: dedup_stable(tests),
        config: config.clone(),
    };
    let status = detect_status(&normalized);

    report.errors.iter().for_each(|e| log::debug!("error: {}", e));
    report.warnings.iter().for_each(|w| log::debug!("warning: {}", w));
    report
        .unit_test_failures
        .iter()
        .for_each(|t| log::debug!("test failure: {}", t));
    log::info!(
        "Parsed {} log for '{}': {} error(s), {} warning(s), {} test failure(s), {}",
        dialect,
        report.platform,
        report.errors.len(),
        report.warnings.len(),
        report.unit_test_failures.len(),
        status
    );

    (report, status)
}
