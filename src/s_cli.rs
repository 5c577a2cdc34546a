use crate::prelude::*;
use crate::s_config::{load_config, SuppressionConfig};
use crate::s_dialect::Dialect;
use crate::s_diff::{diff_with, union_warnings, DiffMode};
use crate::s_report::parse;
use crate::s_summary_file::{read_report, write_report};
use crate::s_table::{render_reports, render_status_line};
use crate::s_types::BuildReport;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

/// Exit code when the parsed log carries a failure status.
pub const EXIT_BUILD_FAILED: i32 = 1;
/// Exit code of `fail-build` when any report still lists warnings.
pub const EXIT_CONTAINS_WARNINGS: i32 = 238;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise fastlane/xcodebuild logs into build reports.", long_about = None)]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Log debug output (RUST_LOG still wins).")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Disable colored table output.")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a build log and save its report as <platform>.buildReport.json.
    Summarise {
        #[arg(long, help = "Compiler generated output.")]
        build_log: PathBuf,

        #[arg(long, value_enum, default_value_t = Dialect::Xcodebuild, help = "Log dialect to parse.")]
        parser: Dialect,

        #[arg(long, help = "Directory for the report file.")]
        output: PathBuf,

        #[arg(long, help = "YAML, JSON or TOML file to exclude messages from specific files.")]
        config: Option<PathBuf>,
    },
    /// Exit with code 238 when any report contains warnings.
    FailBuild {
        #[arg(required = true, help = "Location of .buildReport.json files.")]
        files: Vec<PathBuf>,
    },
    /// Fold diagnostics shared by every report into a Core report.
    Diff {
        #[arg(required = true, help = "Location of .buildReport.json files.")]
        files: Vec<PathBuf>,

        #[arg(long, help = "Only intersect the first two reports.")]
        pairwise: bool,

        #[arg(long, help = "Directory to write the resulting reports to.")]
        output: Option<PathBuf>,
    },
}

/// Runs the parsed command line and returns the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Summarise {
            build_log,
            parser,
            output,
            config,
        } => summarise(build_log, *parser, output, config.as_deref()),
        Command::FailBuild { files } => fail_build(files),
        Command::Diff {
            files,
            pairwise,
            output,
        } => {
            let mode = if *pairwise {
                DiffMode::FirstPair
            } else {
                DiffMode::AllReports
            };
            diff_reports(files, mode, output.as_deref(), !cli.no_color)
        }
    }
}

fn summarise(
    build_log: &Path,
    dialect: Dialect,
    output: &Path,
    config: Option<&Path>,
) -> anyhow::Result<i32> {
    let config = match config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SuppressionConfig::default(),
    };
    let bytes =
        fs::read(build_log).with_context(|| format!("Failed to read {}", build_log.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let (report, status) = parse(&content, &config, dialect);
    let path = write_report(&report, output)
        .with_context(|| format!("Saving summary to {} failed", output.display()))?;

    println!("{}", render_status_line(&report, &status));
    println!("Saved summarised output at: {}", path.display());

    Ok(if status.is_success() { 0 } else { EXIT_BUILD_FAILED })
}

/// Reads every readable report; unreadable ones are logged and skipped.
fn read_reports(files: &[PathBuf]) -> anyhow::Result<Vec<BuildReport>> {
    let mut reports = Vec::new();
    for file in files {
        info!("Processing {}", file.display());
        match read_report(file) {
            Ok(report) => reports.push(report),
            Err(e) => error!("Skipping {}: {}", file.display(), e),
        }
    }
    if reports.is_empty() {
        bail!("No valid build report among {} file(s)", files.len());
    }
    Ok(reports)
}

fn fail_build(files: &[PathBuf]) -> anyhow::Result<i32> {
    let reports = read_reports(files)?;
    let warnings = union_warnings(&reports);
    if warnings.is_empty() {
        println!("No warnings in {} report(s).", reports.len());
        return Ok(0);
    }
    for warning in &warnings {
        println!("warning: {}", warning);
    }
    Ok(EXIT_CONTAINS_WARNINGS)
}

fn diff_reports(
    files: &[PathBuf],
    mode: DiffMode,
    output: Option<&Path>,
    uses_color: bool,
) -> anyhow::Result<i32> {
    let reports = read_reports(files)?;
    let result = diff_with(&reports, mode);

    print!("{}", render_reports(&result, uses_color));

    if let Some(dir) = output {
        for report in &result {
            let path = write_report(report, dir)
                .with_context(|| format!("Saving report to {} failed", dir.display()))?;
            println!("Saved {}", path.display());
        }
    }
    Ok(0)
}
