//! Command-line definition.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use stackgate_core::{split_patterns, RunOptions};
use stackgate_lint::LintOptions;

/// stackgate - validate deployment configurations against their templates
#[derive(Parser, Debug)]
#[command(name = "stackgate")]
#[command(version, about = "Validate deployment configurations against their templates")]
#[command(long_about = r#"
stackgate walks PROJECT_HOME/config, renders every configuration file with the
variables from PROJECT_HOME/variables.yaml, lints the referenced template with
cfn-lint and checks that the configuration supplies exactly the parameters the
template expects.

EXIT CODES:
  0 - Every configuration passed, or there is no config directory
  1 - A configuration failed processing or has mismatched parameters
  n - Worst linter exit code across all templates
"#)]
pub struct Cli {
    /// Print per-file progress and success diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Comma-delimited globs restricting which YAML configuration files run
    #[arg(short = 'c', long = "config", value_name = "PATTERN")]
    pub config: Option<String>,

    /// Comma-delimited globs of configuration files to skip
    #[arg(short = 's', long = "skip", value_name = "PATTERN,...")]
    pub skip: Option<String>,

    /// Options passed to the linter as-is
    #[arg(short = 'o', long = "linter-options", value_name = "STR", allow_hyphen_values = true)]
    pub linter_options: Option<String>,

    /// Rule ids the linter should ignore (`-ti` also accepted)
    #[arg(long = "linter-ignore-options", value_name = "STR", allow_hyphen_values = true)]
    pub linter_ignore_options: Option<String>,

    /// Linter executable
    #[arg(long, env = "STACKGATE_LINTER", default_value = "cfn-lint")]
    pub linter: String,

    /// Variables document (path or URL) instead of PROJECT_HOME/variables.yaml
    #[arg(long, value_name = "SOURCE")]
    pub variables: Option<String>,

    /// Do not look for templates under PROJECT_HOME/templates
    #[arg(long)]
    pub no_template_fallback: bool,

    /// Timeout for fetching remote documents
    #[arg(long, env = "STACKGATE_FETCH_TIMEOUT", value_name = "SECONDS")]
    pub fetch_timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Project root containing the config directory
    pub project_home: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn run_options(&self) -> RunOptions {
        let lint = LintOptions::parse(
            self.linter_options.as_deref(),
            self.linter_ignore_options.as_deref(),
        );

        let mut options = RunOptions::new(&self.project_home)
            .with_include(split_patterns(self.config.as_deref()))
            .with_skip(split_patterns(self.skip.as_deref()))
            .with_lint_options(lint)
            .with_template_fallback(!self.no_template_fallback);

        if let Some(source) = &self.variables {
            options = options.with_variables_source(source);
        }
        if let Some(seconds) = self.fetch_timeout {
            options = options.with_fetch_timeout(Duration::from_secs(seconds));
        }
        options
    }
}

/// Rewrite the two-letter `-ti` flag to its long form.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some("-ti") => Some(OsString::from("--linter-ignore-options")),
            Some(s) if s.starts_with("-ti=") => {
                Some(OsString::from(format!("--linter-ignore-options={}", &s[4..])))
            }
            _ => None,
        };
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
