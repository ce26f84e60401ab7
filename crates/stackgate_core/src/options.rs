//! Run options.

use std::path::PathBuf;
use std::time::Duration;

use stackgate_lint::LintOptions;

/// Directory under the project root holding configuration files.
pub const CONFIG_DIR: &str = "config";

/// Optional variables file at the project root.
pub const VARIABLES_FILE: &str = "variables.yaml";

/// Fallback directory searched for templates.
pub const TEMPLATES_DIR: &str = "templates";

/// Options for one validation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Project root containing `config/` and optionally `variables.yaml`
    pub project_home: PathBuf,
    /// Globs narrowing the YAML files picked up; empty keeps them all
    pub include: Vec<String>,
    /// Extra exclude globs, on top of the reserved `config.yaml`
    pub skip: Vec<String>,
    /// Options forwarded to the linter
    pub lint: LintOptions,
    /// Whether to look under `templates/` when a template path does not exist
    pub template_fallback: bool,
    /// Variables document path or URL overriding `variables.yaml`
    pub variables_source: Option<String>,
    /// Bound on HTTP fetches
    pub fetch_timeout: Option<Duration>,
}

impl RunOptions {
    pub fn new(project_home: impl Into<PathBuf>) -> Self {
        Self {
            project_home: project_home.into(),
            include: Vec::new(),
            skip: Vec::new(),
            lint: LintOptions::default(),
            template_fallback: true,
            variables_source: None,
            fetch_timeout: None,
        }
    }

    pub fn with_include(mut self, patterns: Vec<String>) -> Self {
        self.include = patterns;
        self
    }

    pub fn with_skip(mut self, patterns: Vec<String>) -> Self {
        self.skip.extend(patterns);
        self
    }

    pub fn with_lint_options(mut self, lint: LintOptions) -> Self {
        self.lint = lint;
        self
    }

    pub fn with_template_fallback(mut self, enabled: bool) -> Self {
        self.template_fallback = enabled;
        self
    }

    pub fn with_variables_source(mut self, source: impl Into<String>) -> Self {
        self.variables_source = Some(source.into());
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn config_dir(&self) -> PathBuf {
        self.project_home.join(CONFIG_DIR)
    }

    pub fn variables_file(&self) -> PathBuf {
        self.project_home.join(VARIABLES_FILE)
    }
}

/// Split a comma-delimited CLI value into trimmed, non-empty patterns.
pub fn split_patterns(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RunOptions::new("/project");
        assert!(options.include.is_empty());
        assert!(options.skip.is_empty());
        assert!(options.template_fallback);
        assert_eq!(options.config_dir(), PathBuf::from("/project/config"));
        assert_eq!(options.variables_file(), PathBuf::from("/project/variables.yaml"));
    }

    #[test]
    fn test_builder() {
        let options = RunOptions::new("/project")
            .with_include(vec!["dev/*.yaml".to_string()])
            .with_skip(vec!["legacy".to_string()])
            .with_template_fallback(false)
            .with_variables_source("https://example.com/vars.yaml")
            .with_fetch_timeout(Duration::from_secs(5));

        assert_eq!(options.include, vec!["dev/*.yaml"]);
        assert_eq!(options.skip, vec!["legacy"]);
        assert!(!options.template_fallback);
        assert_eq!(options.variables_source.as_deref(), Some("https://example.com/vars.yaml"));
        assert_eq!(options.fetch_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_split_patterns() {
        assert_eq!(split_patterns(Some("a.yaml, dev/*.yml,,")), vec!["a.yaml", "dev/*.yml"]);
        assert!(split_patterns(None).is_empty());
    }
}
