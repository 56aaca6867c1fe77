//! External linter invocation.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::FrontmatterError;

/// Captured result of one linter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOutput {
    /// Exit status reported by the linter.
    pub status: i32,
    /// Everything the linter wrote to standard output, byte for byte.
    pub stdout: Vec<u8>,
}

/// Runs the external linter against a directory of projections.
///
/// The command line is `<program> [args...] [--filter=<expr>] <cache-root>`.
/// Standard input is closed, standard output is captured and standard error
/// is inherited. There are no retries: a non-zero status is returned as-is.
#[derive(Debug, Clone)]
pub struct LintInvoker {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl LintInvoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Arguments placed before the filter and the cache root.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Upper bound on how long the linter may run.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Builds the argument list passed to the linter.
    pub fn command_args(&self, filter: Option<&str>, root: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            args.push(format!("--filter={}", filter).into());
        }
        args.push(root.as_os_str().to_owned());
        args
    }

    /// Runs the linter and blocks until it exits, times out, or the user
    /// interrupts the run. In the last two cases the linter is killed.
    pub fn run(&self, filter: Option<&str>, root: &Path) -> Result<LintOutput, FrontmatterError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(self.run_async(filter, root))
    }

    async fn run_async(
        &self,
        filter: Option<&str>,
        root: &Path,
    ) -> Result<LintOutput, FrontmatterError> {
        let args = self.command_args(filter, root);
        info!("Running {} {:?}", self.program, args);

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FrontmatterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let finished = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                    .await
                    .map_err(|_| FrontmatterError::Timeout(limit))?
                    .map_err(FrontmatterError::from),
                None => child.wait_with_output().await.map_err(FrontmatterError::from),
            }
        };

        // Dropping `finished` drops the child, which kills it.
        let output = tokio::select! {
            output = finished => output?,
            Ok(()) = tokio::signal::ctrl_c() => return Err(FrontmatterError::Interrupted),
        };

        let status = output.status.code().ok_or(FrontmatterError::Terminated)?;
        debug!("{} exited with status {}", self.program, status);

        Ok(LintOutput {
            status,
            stdout: output.stdout,
        })
    }
}
