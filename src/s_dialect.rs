//! The two log grammars the parser understands and how a single line is
//! tagged under each of them.

use crate::s_extract::is_xctest_assertion;
use std::fmt;
use std::str::FromStr;

/// Error marker printed by fastlane/xcpretty.
pub const FASTLANE_ERROR_MARKER: &str = "❌";
/// Warning marker; matched without the trailing variation selector so both
/// `⚠` and `⚠️` count.
pub const FASTLANE_WARNING_MARKER: &str = "\u{26A0}";
/// Failed test markers (`✔` marks a passing test and is never extracted).
pub const FASTLANE_TEST_MARKERS: [&str; 2] = ["✗", "✖"];

pub const XCODEBUILD_ERROR_MARKER: &str = "error: ";
pub const XCODEBUILD_WARNING_MARKER: &str = "warning: ";
pub const XCODEBUILD_TEST_MARKER: &str = "failed:";

/// Which build tool produced the log.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Dialect {
    /// Emoji-marked fastlane output.
    Fastlane,
    /// Plain compiler-style xcodebuild output.
    #[default]
    Xcodebuild,
}

/// What a line reports, if anything.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum LineClass {
    Error,
    Warning,
    TestFailure,
    /// Log chatter that reports nothing.
    Other,
}

impl Dialect {
    /// Tags a normalized line. A line falls into at most one category; the
    /// first matching marker wins.
    ///
    /// # Example
    /// ```
    /// use buildlog_sift::s_dialect::{Dialect, LineClass};
    ///
    /// assert_eq!(Dialect::Fastlane.classify("❌ /a/B.swift:1:1: x"), LineClass::Error);
    /// assert_eq!(Dialect::Xcodebuild.classify("/a/B.swift:1:1: Warning: x"), LineClass::Warning);
    /// assert_eq!(Dialect::Fastlane.classify("✔ testPasses (0.01 seconds)"), LineClass::Other);
    /// ```
    pub fn classify(&self, line: &str) -> LineClass {
        match self {
            Dialect::Fastlane => {
                if line.contains(FASTLANE_ERROR_MARKER) {
                    LineClass::Error
                } else if line.contains(FASTLANE_WARNING_MARKER) {
                    LineClass::Warning
                } else if FASTLANE_TEST_MARKERS.iter().any(|m| line.contains(m)) {
                    LineClass::TestFailure
                } else {
                    LineClass::Other
                }
            }
            Dialect::Xcodebuild => {
                let lowered = line.to_lowercase();
                // XCTest prints assertion failures as `error:` lines
                if is_xctest_assertion(line) {
                    LineClass::TestFailure
                } else if lowered.contains(XCODEBUILD_ERROR_MARKER) {
                    LineClass::Error
                } else if lowered.contains(XCODEBUILD_WARNING_MARKER) {
                    LineClass::Warning
                } else if lowered.contains(XCODEBUILD_TEST_MARKER) {
                    LineClass::TestFailure
                } else {
                    LineClass::Other
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Fastlane => "fastlane",
            Dialect::Xcodebuild => "xcodebuild",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fastlane" => Ok(Dialect::Fastlane),
            "xcodebuild" => Ok(Dialect::Xcodebuild),
            other => Err(format!("unknown parser dialect '{}'", other)),
        }
    }
}
