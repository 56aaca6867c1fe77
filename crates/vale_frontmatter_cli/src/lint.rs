//! Lint command implementation

use std::io::Write;
use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::{info, warn};
use vale_frontmatter_core::{FrontmatterError, FrontmatterLinter, LintConfig};

use crate::cli::Cli;

/// Exit status reported when the run is interrupted.
pub const INTERRUPTED_STATUS: i32 = 130;

/// Runs the linter and returns the exit status to report.
pub fn run_lint(cli: &Cli) -> Result<i32> {
    let base_dir = std::env::current_dir().into_diagnostic()?;

    let mut config = if let Some(ref path) = cli.config {
        LintConfig::from_file(path).into_diagnostic()?
    } else {
        find_config(&base_dir)?
    };
    apply_overrides(&mut config, cli);

    let patterns = if cli.patterns.is_empty() {
        info!(
            "No patterns provided, using default: {} (current directory)",
            config.patterns.join(", ")
        );
        config.patterns.clone()
    } else {
        cli.patterns.clone()
    };

    info!("Linting files matching: {}", patterns.join(", "));
    info!(
        "Using Vale filter: {}",
        config.filter.as_deref().unwrap_or("(none)")
    );

    let linter = FrontmatterLinter::new(config, base_dir).verbose(cli.verbose);
    let report = match linter.lint_patterns(&patterns) {
        Ok(report) => report,
        Err(FrontmatterError::Interrupted) => {
            warn!("Interrupted, projections removed");
            return Ok(INTERRUPTED_STATUS);
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&report.output).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    Ok(report.status)
}

fn apply_overrides(config: &mut LintConfig, cli: &Cli) {
    if let Some(ref filter) = cli.filter {
        config.filter = Some(filter.clone());
    }
    if let Some(ref linter) = cli.linter {
        config.linter = linter.clone();
    }
    if let Some(seconds) = cli.timeout {
        config.timeout = (seconds > 0).then_some(seconds);
    }
}

fn find_config(dir: &Path) -> Result<LintConfig> {
    if let Some(path) = LintConfig::discover(dir) {
        info!("Using config: {}", path.display());
        return LintConfig::from_file(&path).into_diagnostic();
    }

    Ok(LintConfig::new())
}
