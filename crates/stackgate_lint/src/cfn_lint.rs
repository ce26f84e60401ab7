//! `cfn-lint` runner.
//!
//! Runs the CloudFormation linter as a child process and collects its exit
//! code and formatted findings.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{LintError, LintResult};
use crate::linter::{LintReport, TemplateLinter};
use crate::options::LintOptions;

/// Default executable name.
pub const DEFAULT_BINARY: &str = "cfn-lint";

/// Linter backed by the `cfn-lint` executable.
#[derive(Debug, Clone)]
pub struct CfnLint {
    binary: String,
    /// Timeout in seconds (0 = no timeout)
    timeout_seconds: u64,
}

impl Default for CfnLint {
    fn default() -> Self {
        Self::new()
    }
}

impl CfnLint {
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            timeout_seconds: 0,
        }
    }

    /// Use a different executable (absolute path or name on `PATH`).
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Format command for logging.
    fn format_command(&self, args: &[String]) -> String {
        let mut cmd = self.binary.clone();
        for arg in args {
            if arg.contains(' ') {
                cmd.push_str(&format!(" '{}'", arg));
            } else {
                cmd.push_str(&format!(" {}", arg));
            }
        }
        cmd
    }

    /// Run the engine, surfacing invocation problems as errors.
    pub async fn try_lint(&self, template: &Path, options: &LintOptions) -> LintResult<LintReport> {
        if !template.is_file() {
            return Err(LintError::TemplateNotFound(template.to_path_buf()));
        }

        let args = options.command_args(template);
        info!("Linting template {:?}", template);
        debug!("Executing: {}", self.format_command(&args));

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => LintError::LinterNotAvailable(format!(
                    "{} not found on PATH",
                    self.binary
                )),
                _ => LintError::ExecutionFailed(format!("Failed to spawn {}: {}", self.binary, e)),
            })?;

        let output = if self.timeout_seconds > 0 {
            let timeout = Duration::from_secs(self.timeout_seconds);
            tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| LintError::Timeout(self.timeout_seconds))??
        } else {
            child.wait_with_output().await?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let exit_code = match output.status.code() {
            Some(code) => code,
            None => {
                return Err(LintError::ExecutionFailed(format!(
                    "{} terminated by signal",
                    self.binary
                )))
            }
        };

        debug!("{} exited with code {}", self.binary, exit_code);

        Ok(LintReport::new(exit_code, combine_output(&stdout, &stderr)))
    }
}

/// Join stdout and stderr, skipping whichever is empty.
fn combine_output(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim_end();
    let stderr = stderr.trim_end();
    if stdout.is_empty() {
        stderr.to_string()
    } else if stderr.is_empty() {
        stdout.to_string()
    } else {
        format!("{}\n{}", stdout, stderr)
    }
}

#[async_trait]
impl TemplateLinter for CfnLint {
    async fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    async fn lint(&self, template: &Path, options: &LintOptions) -> LintReport {
        match self.try_lint(template, options).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Linting {:?} failed: {}", template, e);
                LintReport::failed(e.to_string())
            }
        }
    }
}
