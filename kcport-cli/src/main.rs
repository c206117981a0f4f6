//! kcport: export, import and clean up content projects.
//!
//! Usage:
//!   kcport export --source-project <id> --language en-US
//!   kcport import file kc-export-<id>.zip --target-project <id> --publish
//!   kcport cleanup --target-project <id> --yes
//!
//! Management API keys are read from `--source-key` / `--target-key` or the
//! `KCPORT_SOURCE_API_KEY` / `KCPORT_TARGET_API_KEY` environment variables.

use clap::Parser;
use kcport_cli::Cli;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match kcport_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
