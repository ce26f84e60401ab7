//! Options forwarded to the linting engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Rule-selection options for a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintOptions {
    /// Raw arguments passed through to the engine, in order
    pub args: Vec<String>,
    /// Rule ids the engine should ignore
    pub ignore_checks: Vec<String>,
}

impl LintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the CLI strings.
    ///
    /// `options` is split on whitespace. `ignore` accepts rule ids separated by
    /// whitespace or commas.
    pub fn parse(options: Option<&str>, ignore: Option<&str>) -> Self {
        let args = options
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let ignore_checks = ignore
            .map(|s| {
                s.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { args, ignore_checks }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn ignore(mut self, rule_id: impl Into<String>) -> Self {
        self.ignore_checks.push(rule_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.ignore_checks.is_empty()
    }

    /// Full argument list for linting `template`.
    ///
    /// The template comes after `--` so that variadic flags such as
    /// `--ignore-checks` cannot swallow it.
    pub fn command_args(&self, template: &Path) -> Vec<String> {
        let mut args = self.args.clone();

        if !self.ignore_checks.is_empty() {
            args.push("--ignore-checks".to_string());
            args.extend(self.ignore_checks.iter().cloned());
        }

        args.push("--".to_string());
        args.push(template.to_string_lossy().to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let options = LintOptions::parse(None, None);
        assert!(options.is_empty());
        assert_eq!(options, LintOptions::new());
    }

    #[test]
    fn test_parse_whitespace_options() {
        let options = LintOptions::parse(Some("  --format   parseable --include-checks I "), None);
        assert_eq!(options.args, vec!["--format", "parseable", "--include-checks", "I"]);
        assert!(options.ignore_checks.is_empty());
    }

    #[test]
    fn test_parse_ignore_ids() {
        let options = LintOptions::parse(None, Some("W3005,E3012  W2001"));
        assert_eq!(options.ignore_checks, vec!["W3005", "E3012", "W2001"]);
    }

    #[test]
    fn test_command_args_order() {
        let options = LintOptions::new().arg("--format").arg("quiet").ignore("W3005");
        let args = options.command_args(Path::new("templates/app.yaml"));

        assert_eq!(
            args,
            vec!["--format", "quiet", "--ignore-checks", "W3005", "--", "templates/app.yaml"]
        );
    }

    #[test]
    fn test_command_args_without_options() {
        let args = LintOptions::new().command_args(Path::new("app.json"));
        assert_eq!(args, vec!["--", "app.json"]);
    }
}
