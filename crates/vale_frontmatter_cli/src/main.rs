//! vale-frontmatter CLI
//!
//! Lints markdown front matter with Vale while preserving line numbers.

mod cli;
mod lint;

use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::cli::Cli;
use crate::lint::run_lint;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging: progress on stdout, problems on stderr
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .or_else(std::io::stdout),
        )
        .init();

    match run_lint(&cli) {
        Ok(status) => exit_code(status),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
