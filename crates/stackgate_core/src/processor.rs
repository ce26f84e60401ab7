//! Per-configuration processing.
//!
//! Each configuration file is loaded, its template resolved and linted, and
//! its parameters matched against the template schema. Any error along the
//! way becomes a failed [`ProcessOutcome`] for that file only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use stackgate_lint::{LintOptions, LintReport, TemplateLinter};
use tracing::{debug, info, warn};

use crate::config::ConfigLoader;
use crate::error::CoreResult;
use crate::matcher::{match_params, MatchResult};
use crate::options::{RunOptions, TEMPLATES_DIR};
use crate::schema::TemplateSchema;
use crate::variables::Variables;

/// Resolve a configuration's `template_path` against the project root.
///
/// When the direct path does not exist and `fallback` is set, the same
/// relative path under `templates/` is used if it is a regular file.
/// Otherwise the direct path is returned for error reporting.
pub fn resolve_template_path(project_home: &Path, template_path: &str, fallback: bool) -> PathBuf {
    let direct = project_home.join(template_path);
    if direct.exists() || !fallback {
        return direct;
    }

    let alternate = project_home.join(TEMPLATES_DIR).join(template_path);
    if alternate.is_file() {
        debug!("Using fallback template path {:?}", alternate);
        alternate
    } else {
        direct
    }
}

/// Result of processing one configuration file.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    /// Configuration path relative to the config directory
    pub config: PathBuf,
    /// Resolved template, relative to the project root when possible
    pub template: Option<PathBuf>,
    pub exit_code: i32,
    pub lint: Option<LintReport>,
    pub params: Option<MatchResult>,
    /// Set when processing failed before both checks completed
    pub error: Option<String>,
}

impl ProcessOutcome {
    fn failed(config: &Path, message: String) -> Self {
        Self {
            config: config.to_path_buf(),
            template: None,
            exit_code: 1,
            lint: None,
            params: None,
            error: Some(message),
        }
    }

    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }

    fn template_label(&self) -> String {
        self.template
            .as_ref()
            .map(|t| t.display().to_string())
            .unwrap_or_default()
    }

    /// Lint findings for this file, whether or not it passed.
    pub fn lint_output(&self) -> &str {
        self.lint.as_ref().map(|l| l.output.as_str()).unwrap_or("")
    }

    /// Combined diagnostics; empty when the file passed.
    pub fn report(&self) -> String {
        if self.passed() {
            return String::new();
        }
        if let Some(error) = &self.error {
            return error.clone();
        }

        let mut sections = Vec::new();
        if let Some(lint) = &self.lint {
            if !lint.output.is_empty() {
                sections.push(format!("Template [{}]:\n{}", self.template_label(), lint.output));
            } else if !lint.success() {
                sections.push(format!(
                    "Template [{}]: linter exited with code {}",
                    self.template_label(),
                    lint.exit_code
                ));
            }
        }
        if let Some(params) = &self.params {
            if !params.message.is_empty() {
                sections.push(format!("Parameters [{}]:\n{}", self.config.display(), params.message));
            }
        }
        sections.join("\n")
    }
}

/// Validates single configuration files.
pub struct ConfigProcessor {
    linter: Arc<dyn TemplateLinter>,
    loader: ConfigLoader,
    project_home: PathBuf,
    lint_options: LintOptions,
    template_fallback: bool,
}

impl ConfigProcessor {
    pub fn new(linter: Arc<dyn TemplateLinter>, options: &RunOptions) -> Self {
        Self {
            linter,
            loader: ConfigLoader::new(),
            project_home: options.project_home.clone(),
            lint_options: options.lint.clone(),
            template_fallback: options.template_fallback,
        }
    }

    /// Process the configuration at `config_path`, labelled `label` in reports.
    pub async fn process_one(&self, config_path: &Path, label: &Path, variables: &Variables) -> ProcessOutcome {
        match self.try_process(config_path, label, variables).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Failed to process {:?}: {}", config_path, e);
                ProcessOutcome::failed(
                    label,
                    format!("Failed to process config file: {}: {}", config_path.display(), e),
                )
            }
        }
    }

    async fn try_process(
        &self,
        config_path: &Path,
        label: &Path,
        variables: &Variables,
    ) -> CoreResult<ProcessOutcome> {
        let config = self.loader.load(config_path, variables)?;
        let template = resolve_template_path(&self.project_home, &config.template_path, self.template_fallback);
        info!("Validating {:?} against template {:?}", label, template);

        let lint = self.linter.lint(&template, &self.lint_options).await;
        let schema = TemplateSchema::load(&template)?;
        let params = match_params(&config.parameter_names(), &schema);

        let exit_code = lint.exit_code.max(params.exit_code);
        debug!(
            "{:?}: lint exit {}, params exit {}",
            label, lint.exit_code, params.exit_code
        );

        let template = match template.strip_prefix(&self.project_home) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => template.clone(),
        };

        Ok(ProcessOutcome {
            config: label.to_path_buf(),
            template: Some(template),
            exit_code,
            lint: Some(lint),
            params: Some(params),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stackgate_lint::MockLinter;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_direct_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), "").unwrap();

        let resolved = resolve_template_path(dir.path(), "app.yaml", true);
        assert_eq!(resolved, dir.path().join("app.yaml"));
    }

    #[test]
    fn test_resolve_fallback_to_templates_dir() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/app.yaml"), "").unwrap();

        let resolved = resolve_template_path(dir.path(), "app.yaml", true);
        assert_eq!(resolved, dir.path().join("templates/app.yaml"));

        let disabled = resolve_template_path(dir.path(), "app.yaml", false);
        assert_eq!(disabled, dir.path().join("app.yaml"));
    }

    #[test]
    fn test_resolve_keeps_missing_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("templates/app.yaml")).unwrap();

        // a directory under templates/ is not a usable fallback
        let resolved = resolve_template_path(dir.path(), "app.yaml", true);
        assert_eq!(resolved, dir.path().join("app.yaml"));
    }

    #[test]
    fn test_report_sections() {
        let outcome = ProcessOutcome {
            config: PathBuf::from("dev/app.yaml"),
            template: Some(PathBuf::from("templates/app.yaml")),
            exit_code: 2,
            lint: Some(LintReport::new(2, "E3012 bad type")),
            params: Some(MatchResult {
                exit_code: 1,
                message: "Missing template params: {Env}".to_string(),
                ..Default::default()
            }),
            error: None,
        };

        assert_eq!(
            outcome.report(),
            "Template [templates/app.yaml]:\nE3012 bad type\nParameters [dev/app.yaml]:\nMissing template params: {Env}"
        );
    }

    #[test]
    fn test_report_silent_lint_failure() {
        let outcome = ProcessOutcome {
            config: PathBuf::from("app.yaml"),
            template: Some(PathBuf::from("app.template")),
            exit_code: 4,
            lint: Some(LintReport::new(4, "")),
            params: Some(MatchResult::default()),
            error: None,
        };
        assert_eq!(outcome.report(), "Template [app.template]: linter exited with code 4");
    }

    #[tokio::test]
    async fn test_process_one_passes() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("app.yaml"),
            "Parameters:\n  Env: {Type: String}\n  Size: {Type: String, Default: small}\n",
        )
        .unwrap();
        let config = dir.path().join("config/app.yaml");
        fs::write(&config, "template_path: app.yaml\nparameters:\n  Env: {{ var.env }}\n").unwrap();

        let linter = MockLinter::new();
        let processor = ConfigProcessor::new(Arc::new(linter.clone()), &RunOptions::new(dir.path()));
        let vars = Variables::new().insert("env", "prod");

        let outcome = processor.process_one(&config, Path::new("app.yaml"), &vars).await;

        assert!(outcome.passed(), "{}", outcome.report());
        assert_eq!(outcome.report(), "");
        assert_eq!(outcome.template, Some(PathBuf::from("app.yaml")));
        assert_eq!(linter.get_calls()[0].template, dir.path().join("app.yaml"));
    }

    #[tokio::test]
    async fn test_exit_code_is_worst_of_both_checks() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.yaml"), "Parameters:\n  Env: {Type: String}\n").unwrap();
        let config = dir.path().join("app-config.yaml");
        fs::write(&config, "template_path: app.yaml\nparameters: {}\n").unwrap();

        let linter = MockLinter::new().add_response(LintReport::new(2, "E1001 finding"));
        let processor = ConfigProcessor::new(Arc::new(linter), &RunOptions::new(dir.path()));

        let outcome = processor
            .process_one(&config, Path::new("app-config.yaml"), &Variables::new())
            .await;

        assert_eq!(outcome.exit_code, 2);
        let report = outcome.report();
        assert!(report.contains("E1001 finding"));
        assert!(report.contains("Missing template params: {Env}"));
    }

    #[tokio::test]
    async fn test_failures_become_outcomes() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("broken.yaml");
        fs::write(&config, "template_path: [oops\n").unwrap();

        let processor = ConfigProcessor::new(Arc::new(MockLinter::new()), &RunOptions::new(dir.path()));
        let outcome = processor
            .process_one(&config, Path::new("broken.yaml"), &Variables::new())
            .await;

        assert_eq!(outcome.exit_code, 1);
        let expected_prefix = format!("Failed to process config file: {}: ", config.display());
        assert!(outcome.report().starts_with(&expected_prefix), "{}", outcome.report());
    }
}
