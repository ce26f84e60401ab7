//! # stackgate_lint
//!
//! Template linting for stackgate.
//!
//! The linting rules themselves live in an external engine. This crate only
//! knows how to invoke it against a template file, forward rule-selection
//! options, and collect an exit code plus a formatted report.
//!
//! # Features
//!
//! - **`TemplateLinter` trait**: the seam the validator depends on
//! - **`CfnLint`**: runs the `cfn-lint` executable as a child process
//! - **`MockLinter`**: scripted responses for tests without `cfn-lint` installed
//!
//! # Example
//!
//! ```rust,no_run
//! use stackgate_lint::{CfnLint, LintOptions, TemplateLinter};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let linter = CfnLint::new();
//!     let options = LintOptions::parse(Some("--format parseable"), Some("W3005"));
//!
//!     let report = linter.lint(Path::new("templates/app.yaml"), &options).await;
//!     println!("exit code {}: {}", report.exit_code, report.output);
//! }
//! ```

pub mod cfn_lint;
pub mod error;
pub mod linter;
pub mod mock;
pub mod options;

pub use cfn_lint::CfnLint;
pub use error::{LintError, LintResult};
pub use linter::{LintReport, TemplateLinter};
pub use mock::{CapturedLint, MockLinter};
pub use options::LintOptions;
