//! Linter trait and report type.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::options::LintOptions;

/// Outcome of linting one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Engine exit code; 0 means no blocking findings
    pub exit_code: i32,
    /// Formatted findings, possibly non-empty on success
    pub output: String,
}

impl LintReport {
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    /// A report with no findings.
    pub fn clean() -> Self {
        Self::default()
    }

    /// A report for an engine that could not be run at all.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Template linter trait.
///
/// `lint` never fails: problems invoking the engine are folded into a report
/// with a non-zero exit code so that one template cannot abort a batch.
#[async_trait]
pub trait TemplateLinter: Send + Sync {
    /// Check whether the engine can be invoked.
    async fn is_available(&self) -> bool;

    /// Lint a single template file.
    async fn lint(&self, template: &Path, options: &LintOptions) -> LintReport;
}
