//! Decides whether an extracted message survives the suppression config.
//!
//! Every rule whose pattern is `"*"` or a substring of the message's file
//! path is consulted; a single drop verdict from any of them is final.

use crate::s_config::{SuppressionConfig, SuppressionRule};
use crate::s_types::{DiagnosticMessage, TestFailure};

pub const WILDCARD: &str = "*";

fn rules_for<'a>(
    config: &'a SuppressionConfig,
    subject: &'a str,
) -> impl Iterator<Item = (&'a String, &'a SuppressionRule)> + 'a {
    config
        .ignore
        .iter()
        .filter(move |(pattern, _)| pattern.as_str() == WILDCARD || subject.contains(pattern.as_str()))
}

/// Case-insensitive keyword match where the keyword `"*"` matches anything.
fn matches_loosely(text: &str, keywords: &[String]) -> Option<String> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .find(|keyword| keyword.as_str() == WILDCARD || lowered.contains(&keyword.to_lowercase()))
        .cloned()
}

/// Errors are dropped when their text contains any listed keyword, compared
/// case-sensitively.
pub fn keep_error(config: &SuppressionConfig, error: &DiagnosticMessage) -> bool {
    for (pattern, rule) in rules_for(config, &error.file_path) {
        let Some(keywords) = rule.errors.as_ref() else {
            continue;
        };
        if let Some(keyword) = keywords.iter().find(|k| error.text.contains(k.as_str())) {
            log::debug!(
                "Ignore error as it matches rule '{}' ({}): {}",
                pattern,
                keyword,
                error
            );
            return false;
        }
    }
    true
}

/// Warnings are dropped when their text contains a listed keyword in any
/// case, or when the rule lists the wildcard keyword.
pub fn keep_warning(config: &SuppressionConfig, warning: &DiagnosticMessage) -> bool {
    for (pattern, rule) in rules_for(config, &warning.file_path) {
        let Some(keywords) = rule.warnings.as_ref() else {
            continue;
        };
        if let Some(keyword) = matches_loosely(&warning.text, keywords) {
            log::debug!(
                "Ignore warning as it matches rule '{}' ({}): {}",
                pattern,
                keyword,
                warning
            );
            return false;
        }
    }
    true
}

/// Tests carry no file path; a rule applies when its pattern is `"*"` or
/// occurs in the method name (typically the test class). Keywords are
/// matched like warning keywords against the full description.
pub fn keep_test(config: &SuppressionConfig, failure: &TestFailure) -> bool {
    let description = failure.description();
    for (pattern, rule) in rules_for(config, &failure.method) {
        let Some(keywords) = rule.tests.as_ref() else {
            continue;
        };
        if let Some(keyword) = matches_loosely(&description, keywords) {
            log::debug!(
                "Ignore test failure as it matches rule '{}' ({}): {}",
                pattern,
                keyword,
                failure
            );
            return false;
        }
    }
    true
}
