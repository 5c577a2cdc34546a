// common/test_prelude.rs

// Re-export commonly used items for integration tests.
pub use assert_cmd::Command;
pub use predicates::prelude::*;
pub use predicates::str::contains;
pub use tempfile::{tempdir, TempDir};

/// The `buildlog-sift` binary under test, with logging quietened.
pub fn sift() -> Command {
    let mut cmd = Command::cargo_bin("buildlog-sift").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}
