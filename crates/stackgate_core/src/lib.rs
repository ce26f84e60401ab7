//! # stackgate_core
//!
//! Pre-deployment validation of infrastructure configurations.
//!
//! A project keeps one YAML configuration per deployment under `config/`.
//! Each configuration names a template and supplies its parameters. This
//! crate finds those configurations, renders them with the project's
//! variables, lints the referenced template and checks that the supplied
//! parameters are exactly the ones the template expects.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stackgate_core::{RunOptions, Validator};
//! use stackgate_lint::CfnLint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = RunOptions::new("./infrastructure").with_skip(vec!["legacy".to_string()]);
//!     let validator = Validator::new(options, Arc::new(CfnLint::new()))?;
//!
//!     let summary = validator.run().await?;
//!     for failure in summary.failures() {
//!         println!("{}:\n{}", failure.config.display(), failure.report());
//!     }
//!     std::process::exit(summary.exit_code);
//! }
//! ```

pub mod config;
pub mod content;
pub mod discovery;
pub mod error;
pub mod matcher;
pub mod options;
pub mod processor;
pub mod runner;
pub mod schema;
pub mod substitute;
pub mod variables;
pub mod yaml;

pub use config::{ConfigLoader, Configuration};
pub use content::{ContentFormat, ContentLoader};
pub use discovery::{discover, PathFilter, DEFAULT_INCLUDE, RESERVED_CONFIG};
pub use error::{CoreError, CoreResult};
pub use matcher::{match_params, MatchResult};
pub use options::{split_patterns, RunOptions, CONFIG_DIR, TEMPLATES_DIR, VARIABLES_FILE};
pub use processor::{resolve_template_path, ConfigProcessor, ProcessOutcome};
pub use runner::{RunSummary, Validator};
pub use schema::TemplateSchema;
pub use substitute::Substitutor;
pub use variables::Variables;
