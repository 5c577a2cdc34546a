#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::fs;
    pub use std::path::{Path, PathBuf};
    pub use log::{debug, error, info, warn};
}

pub mod s_cli;
pub mod s_config;
pub mod s_dialect;
pub mod s_diff;
pub mod s_error;
pub mod s_extract;
pub mod s_normalize;
pub mod s_report;
pub mod s_suppress;
pub mod s_summary_file;
pub mod s_table;
pub mod s_types;

pub use s_config::{load_config, SuppressionConfig, SuppressionRule};
pub use s_dialect::{Dialect, LineClass};
pub use s_diff::{diff, diff_with, DiffMode};
pub use s_error::SiftError;
pub use s_report::parse;
pub use s_types::{BuildReport, BuildStatus, DiagnosticMessage, TestFailure};
