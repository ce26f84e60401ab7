//! Mock linter for testing.
//!
//! Provides a configurable implementation of the TemplateLinter trait for
//! use in tests without requiring `cfn-lint` to be installed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::linter::{LintReport, TemplateLinter};
use crate::options::LintOptions;

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedLint {
    pub template: PathBuf,
    pub options: LintOptions,
}

/// Mock linter.
///
/// Reports are looked up by template file name first, then taken from the
/// queued responses in order (cycling), and default to a clean report.
#[derive(Clone)]
pub struct MockLinter {
    available: Arc<RwLock<bool>>,
    /// Reports keyed by template file name.
    by_template: Arc<RwLock<HashMap<String, LintReport>>>,
    /// Queued reports for templates without a keyed report.
    responses: Arc<RwLock<Vec<LintReport>>>,
    response_index: Arc<AtomicUsize>,
    captured_calls: Arc<RwLock<Vec<CapturedLint>>>,
}

impl Default for MockLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLinter {
    pub fn new() -> Self {
        Self {
            available: Arc::new(RwLock::new(true)),
            by_template: Arc::new(RwLock::new(HashMap::new())),
            responses: Arc::new(RwLock::new(Vec::new())),
            response_index: Arc::new(AtomicUsize::new(0)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn set_available(self, available: bool) -> Self {
        *self.available.write() = available;
        self
    }

    /// Return `report` whenever a template with this file name is linted.
    pub fn for_template(self, file_name: impl Into<String>, report: LintReport) -> Self {
        self.by_template.write().insert(file_name.into(), report);
        self
    }

    pub fn add_response(self, report: LintReport) -> Self {
        self.responses.write().push(report);
        self
    }

    pub fn get_calls(&self) -> Vec<CapturedLint> {
        self.captured_calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    pub fn clear_calls(&self) {
        self.captured_calls.write().clear();
    }

    fn next_response(&self, template: &Path) -> LintReport {
        let key = template
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if let Some(report) = self.by_template.read().get(&key) {
            return report.clone();
        }

        let responses = self.responses.read();
        if responses.is_empty() {
            return LintReport::clean();
        }
        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        responses
            .get(index % responses.len())
            .cloned()
            .unwrap_or_else(LintReport::clean)
    }
}

#[async_trait]
impl TemplateLinter for MockLinter {
    async fn is_available(&self) -> bool {
        *self.available.read()
    }

    async fn lint(&self, template: &Path, options: &LintOptions) -> LintReport {
        self.captured_calls.write().push(CapturedLint {
            template: template.to_path_buf(),
            options: options.clone(),
        });
        self.next_response(template)
    }
}
