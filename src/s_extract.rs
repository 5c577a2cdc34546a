//! Turns a classified log line into a [`DiagnosticMessage`] or a
//! [`TestFailure`].
//!
//! Lines that do not fit the grammar yield `None`; that is the normal fate
//! of most log chatter and is never treated as a fault.

use crate::s_dialect::{Dialect, FASTLANE_TEST_MARKERS};
use crate::s_types::{DiagnosticMessage, TestFailure};
use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::error!("Failed to create regex '{}': {}", pattern, e);
            None
        }
    }
}

/// Trailing compiler flag annotation, e.g. ` [-Wdeprecated-declarations]`.
static WARNING_FLAG_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"\s*\[-W[^\]\s]*\]\s*$"));

/// Object identities such as `<NSObject: 0x600000c1c0a0>` differ on every run.
static OBJECT_IDENTITY_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| compile(r"<[A-Za-z_][\w.]*: 0x[0-9a-fA-F]+>"));

/// `-[AppTests testLogin] : XCTAssertTrue failed: ("false") is not true`
static XCTEST_ASSERTION_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"(?i)-\[([^\s\]]+) ([^\]]+)\]\s*:\s*(.*?)\s*failed:\s*(.*)$")
});

/// swift-corelibs-xctest form without brackets:
/// `error: LoginTests.testLogin : XCTAssertEqual failed: ("1") is not equal to ("2")`
static XCTEST_QUALIFIED_ASSERTION_REGEX: Lazy<Option<Regex>> = Lazy::new(|| {
    compile(r"(?i)error:\s*([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)+(?:\(\))?)\s+:\s*(.*?)\s*failed:\s*(.*)$")
});

static XCODEBUILD_TEST_MARKER_REGEX: Lazy<Option<Regex>> = Lazy::new(|| compile(r"(?i)failed:"));

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn normalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}', '\u{02BC}'], "'")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Cleans the free-text part of a compiler message.
pub fn clean_message_text(text: &str) -> String {
    let without_flag = match WARNING_FLAG_REGEX.as_ref() {
        Some(regex) => regex.replace(text, "").into_owned(),
        None => text.to_string(),
    };
    normalize_apostrophes(&collapse_whitespace(&without_flag))
}

/// Cleans a test failure explanation: object identities are dropped so the
/// same failure compares equal across runs.
pub fn clean_explanation(text: &str) -> String {
    let without_identity = match OBJECT_IDENTITY_REGEX.as_ref() {
        Some(regex) => regex.replace_all(text, "").into_owned(),
        None => text.to_string(),
    };
    collapse_whitespace(&without_identity)
}

/// Parses `<noise>/abs/path/File.swift:<line>:<column>:<text>`.
///
/// Everything before the first `/` is log prefix noise. Unparseable line or
/// column numbers become `-1`.
///
/// # Example
/// ```
/// use buildlog_sift::s_extract::extract_diagnostic;
///
/// let msg = extract_diagnostic("❌ /repo/A.swift:10:2: error: types don't match").unwrap();
/// assert_eq!(msg.file_name, "A.swift");
/// assert_eq!((msg.line, msg.column), (10, 2));
/// assert_eq!(msg.text, "error: types don't match");
/// assert!(extract_diagnostic("❌ no location here").is_none());
/// ```
pub fn extract_diagnostic(line: &str) -> Option<DiagnosticMessage> {
    let slash = line.find('/')?;
    let components: Vec<&str> = line[slash..].split(':').collect();
    if components.len() < 4 {
        log::trace!("Not a diagnostic, too few components: {}", line);
        return None;
    }

    let path = components[0];
    let line_number = components[1].trim().parse::<i64>().unwrap_or(-1);
    let column = components[2].trim().parse::<i64>().unwrap_or(-1);
    let text = clean_message_text(&components[3..].join(":"));

    Some(DiagnosticMessage::new(path, line_number, column, &text))
}

/// True when the line is an XCTest assertion failure in either the
/// bracketed Objective-C form or the qualified swift-corelibs form.
pub fn is_xctest_assertion(line: &str) -> bool {
    [&*XCTEST_ASSERTION_REGEX, &*XCTEST_QUALIFIED_ASSERTION_REGEX]
        .into_iter()
        .flatten()
        .any(|regex| regex.is_match(line))
}

/// Parses a failed test line according to the dialect's grammar.
///
/// # Example
/// ```
/// use buildlog_sift::s_dialect::Dialect;
/// use buildlog_sift::s_extract::extract_test_failure;
///
/// let failure = extract_test_failure(
///     "✗ testFoo(), XCTAssertEqual - expected 1 got 2",
///     Dialect::Fastlane,
/// )
/// .unwrap();
/// assert_eq!(failure.method, "testFoo()");
/// assert_eq!(failure.assertion_kind.as_deref(), Some("XCTAssertEqual"));
/// assert_eq!(failure.explanation.as_deref(), Some("expected 1 got 2"));
/// ```
pub fn extract_test_failure(line: &str, dialect: Dialect) -> Option<TestFailure> {
    match dialect {
        Dialect::Fastlane => {
            let start = FASTLANE_TEST_MARKERS
                .iter()
                .filter_map(|marker| line.find(marker))
                .min()?;
            // the marker and the space after it
            let prefix_len: usize = line[start..].chars().take(2).map(char::len_utf8).sum();
            split_test_components(&line[start..], prefix_len)
        }
        Dialect::Xcodebuild => {
            if let Some(caps) = XCTEST_ASSERTION_REGEX.as_ref().and_then(|r| r.captures(line)) {
                let class = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let method = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
                let assertion = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
                let explanation = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
                return Some(TestFailure {
                    method: format!("{}.{}", class, method),
                    assertion_kind: non_empty(collapse_whitespace(assertion)),
                    explanation: non_empty(clean_explanation(explanation)),
                });
            }
            if let Some(caps) = XCTEST_QUALIFIED_ASSERTION_REGEX
                .as_ref()
                .and_then(|r| r.captures(line))
            {
                let method = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let assertion = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                let explanation = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
                return Some(TestFailure {
                    method: method.to_string(),
                    assertion_kind: non_empty(collapse_whitespace(assertion)),
                    explanation: non_empty(clean_explanation(explanation)),
                });
            }
            let marker = XCODEBUILD_TEST_MARKER_REGEX.as_ref()?.find(line)?;
            split_test_components(&line[marker.start()..], marker.len())
        }
    }
}

/// Generic `<marker> method, assertion - explanation` grammar. `rest` starts
/// at the marker; `prefix_len` bytes are dropped from the method.
fn split_test_components(rest: &str, prefix_len: usize) -> Option<TestFailure> {
    let components: Vec<&str> = rest.split([',', '-']).collect();

    if components.len() >= 3 {
        let method = components[0].get(prefix_len..).unwrap_or_default().trim();
        if method.is_empty() {
            return None;
        }
        return Some(TestFailure {
            method: method.to_string(),
            assertion_kind: non_empty(components[1].trim().to_string()),
            explanation: non_empty(clean_explanation(components[2])),
        });
    }

    // bare method name, e.g. `✗ testFoo (0.012 seconds)`
    let method = rest.get(prefix_len..)?.split_whitespace().next()?;
    Some(TestFailure {
        method: method.to_string(),
        assertion_kind: None,
        explanation: None,
    })
}
