//! # buildlog-sift
//!
//! Summarises fastlane or xcodebuild output into `.buildReport.json` files,
//! fails a CI step when reports still carry warnings, and folds the
//! diagnostics every platform shares into a single Core report.
//!
//! ## Quick Start
//! ```sh
//! buildlog-sift summarise --build-log ios.log --parser fastlane --output reports/
//! buildlog-sift diff reports/*.buildReport.json
//! buildlog-sift fail-build reports/*.buildReport.json
//! ```

use buildlog_sift::s_cli::{run, Cli};
use clap::Parser;

pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let code = run(&cli)?;
    std::process::exit(code);
}
