mod common;

use buildlog_sift::s_summary_file::read_report;
use common::test_logs::{write_file, CLEAN_LOG, IOS_LOG, MAC_LOG, PODS_CONFIG_YAML};
use common::test_prelude::*;
use std::path::{Path, PathBuf};

fn summarise(log: &Path, out: &Path) -> Command {
    let mut cmd = sift();
    cmd.arg("summarise")
        .arg("--build-log")
        .arg(log)
        .arg("--parser")
        .arg("fastlane")
        .arg("--output")
        .arg(out);
    cmd
}

/// Summarises both fastlane fixtures into `out` and returns the report paths.
fn summarise_both(dir: &Path, out: &Path) -> std::io::Result<Vec<PathBuf>> {
    let ios = write_file(dir, "ios.log", IOS_LOG)?;
    let mac = write_file(dir, "mac.log", MAC_LOG)?;
    summarise(&ios, out).assert().code(1);
    summarise(&mac, out).assert().success();
    Ok(vec![
        out.join("App_iOS.buildReport.json"),
        out.join("App_macOS.buildReport.json"),
    ])
}

#[test]
fn test_summarise_writes_report_and_fails_on_exit_status() -> std::io::Result<()> {
    let dir = tempdir()?;
    let log = write_file(dir.path(), "ios.log", IOS_LOG)?;
    let out = dir.path().join("reports");

    summarise(&log, &out)
        .assert()
        .code(1)
        .stdout(contains("App iOS"))
        .stdout(contains("failure (exit code 65)"))
        .stdout(contains("App_iOS.buildReport.json"));

    let report = read_report(&out.join("App_iOS.buildReport.json")).unwrap();
    assert_eq!(report.platform, "App iOS");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.warnings.len(), 3);
    assert_eq!(report.unit_test_failures.len(), 1);
    assert_eq!(report.unit_test_failures[0].method, "testSync()");
    Ok(())
}

#[test]
fn test_summarise_applies_config() -> std::io::Result<()> {
    let dir = tempdir()?;
    let log = write_file(dir.path(), "ios.log", IOS_LOG)?;
    let config = write_file(dir.path(), "suppress.yml", PODS_CONFIG_YAML)?;
    let out = dir.path().join("reports");

    summarise(&log, &out).arg("--config").arg(&config).assert().code(1);

    let report = read_report(&out.join("App_iOS.buildReport.json")).unwrap();
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().all(|w| w.file_name != "Legacy.m"));
    assert_eq!(report.config.ignore.len(), 1);
    Ok(())
}

#[test]
fn test_summarise_rejects_unknown_config_format() -> std::io::Result<()> {
    let dir = tempdir()?;
    let log = write_file(dir.path(), "ios.log", IOS_LOG)?;
    let config = write_file(dir.path(), "suppress.ini", "ignore = nothing")?;

    summarise(&log, dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("Failed to load config"));
    Ok(())
}

#[test]
fn test_summarise_missing_log_is_an_error() -> std::io::Result<()> {
    let dir = tempdir()?;
    summarise(&dir.path().join("missing.log"), dir.path())
        .assert()
        .failure()
        .stderr(contains("Failed to read"));
    Ok(())
}

#[test]
fn test_fail_build_exits_238_with_warnings() -> std::io::Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("reports");
    let reports = summarise_both(dir.path(), &out)?;

    sift()
        .arg("fail-build")
        .args(&reports)
        .assert()
        .code(238)
        .stdout(contains("Shared.swift"))
        .stdout(contains("Legacy.m"));
    Ok(())
}

#[test]
fn test_fail_build_passes_clean_reports() -> std::io::Result<()> {
    let dir = tempdir()?;
    let log = write_file(dir.path(), "tv.log", CLEAN_LOG)?;
    summarise(&log, dir.path()).assert().success();

    sift()
        .arg("fail-build")
        .arg(dir.path().join("App_tvOS.buildReport.json"))
        .assert()
        .success()
        .stdout(contains("No warnings"));
    Ok(())
}

#[test]
fn test_fail_build_without_readable_reports() -> std::io::Result<()> {
    let dir = tempdir()?;
    let bogus = write_file(dir.path(), "bogus.buildReport.json", "not json")?;
    sift()
        .arg("fail-build")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(contains("No valid build report"));
    Ok(())
}

#[test]
fn test_diff_writes_core_report() -> std::io::Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("reports");
    let reports = summarise_both(dir.path(), &out)?;
    let diffed = dir.path().join("diffed");

    sift()
        .arg("--no-color")
        .arg("diff")
        .args(&reports)
        .arg("--output")
        .arg(&diffed)
        .assert()
        .success()
        .stdout(contains("## 3. Core"))
        .stdout(contains("Core.buildReport.json"));

    let core = read_report(&diffed.join("Core.buildReport.json")).unwrap();
    assert_eq!(core.warnings.len(), 1);
    assert_eq!(core.warnings[0].file_name, "Shared.swift");
    assert_eq!(core.unit_test_failures.len(), 1);
    assert!(core.errors.is_empty());

    let mac = read_report(&diffed.join("App_macOS.buildReport.json")).unwrap();
    assert!(mac.is_clean());
    let ios = read_report(&diffed.join("App_iOS.buildReport.json")).unwrap();
    assert_eq!(ios.errors.len(), 1);
    assert_eq!(ios.warnings.len(), 2);
    Ok(())
}

#[test]
fn test_diff_single_report_has_no_core() -> std::io::Result<()> {
    let dir = tempdir()?;
    let log = write_file(dir.path(), "mac.log", MAC_LOG)?;
    summarise(&log, dir.path()).assert().success();

    sift()
        .arg("--no-color")
        .arg("diff")
        .arg(dir.path().join("App_macOS.buildReport.json"))
        .assert()
        .success()
        .stdout(contains("App macOS"))
        .stdout(contains("Core").not());
    Ok(())
}
