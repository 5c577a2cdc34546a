use crate::s_config::SuppressionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A compiler error or warning pulled out of a build log.
///
/// Two messages are equal when their file name, line, column and text match;
/// the full path is kept for suppression but does not take part in equality,
/// so the same diagnostic reported from two checkouts still collapses.
///
/// # Example
/// ```
/// use buildlog_sift::DiagnosticMessage;
///
/// let a = DiagnosticMessage::new("/ci/one/A.swift", 10, 2, "unused variable");
/// let b = DiagnosticMessage::new("/ci/two/A.swift", 10, 2, "unused variable");
/// assert_eq!(a.file_name, "A.swift");
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(rename = "path")]
    pub file_path: String,
    #[serde(rename = "file")]
    pub file_name: String,
    pub line: i64,
    pub column: i64,
    #[serde(rename = "message")]
    pub text: String,
}

impl DiagnosticMessage {
    pub fn new(file_path: &str, line: i64, column: i64, text: &str) -> Self {
        let file_name = file_path
            .rsplit('/')
            .find(|component| !component.is_empty())
            .unwrap_or(file_path)
            .to_string();
        DiagnosticMessage {
            file_path: file_path.to_string(),
            file_name,
            line,
            column,
            text: text.to_string(),
        }
    }
}

impl PartialEq for DiagnosticMessage {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
            && self.line == other.line
            && self.column == other.column
            && self.text == other.text
    }
}

impl Eq for DiagnosticMessage {}

impl Hash for DiagnosticMessage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_name.hash(state);
        self.line.hash(state);
        self.column.hash(state);
        self.text.hash(state);
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [Line: {}] {}", self.file_name, self.line, self.text)
    }
}

/// One failed unit test occurrence.
///
/// Equality and hashing use `method` only: several assertion failures
/// inside the same test method are reported once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestFailure {
    pub method: String,
    #[serde(rename = "assertType", default, skip_serializing_if = "Option::is_none")]
    pub assertion_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl TestFailure {
    /// Method, assertion and explanation joined by spaces; what test
    /// suppression keywords are matched against.
    pub fn description(&self) -> String {
        [
            Some(self.method.as_str()),
            self.assertion_kind.as_deref(),
            self.explanation.as_deref(),
        ]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
    }
}

impl PartialEq for TestFailure {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
    }
}

impl Eq for TestFailure {}

impl Hash for TestFailure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.method.hash(state);
    }
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method)
    }
}

/// Completion status the build tool reported about itself.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    Failure { exit_code: i32 },
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Success)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Failure { exit_code } => write!(f, "failure (exit code {})", exit_code),
        }
    }
}

/// Everything extracted from one build target's log.
///
/// Built once by [`crate::s_report::parse`] (or by the differencer) and
/// only read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub platform: String,
    pub errors: Vec<DiagnosticMessage>,
    pub warnings: Vec<DiagnosticMessage>,
    #[serde(rename = "unitTests")]
    pub unit_test_failures: Vec<TestFailure>,
    #[serde(default)]
    pub config: SuppressionConfig,
}

impl BuildReport {
    pub fn empty(platform: &str) -> Self {
        BuildReport {
            platform: platform.to_string(),
            errors: Vec::new(),
            warnings: Vec::new(),
            unit_test_failures: Vec::new(),
            config: SuppressionConfig::default(),
        }
    }

    /// True when nothing at all was reported.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.unit_test_failures.len()
    }
}
