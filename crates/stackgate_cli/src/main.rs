//! stackgate CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Every configuration passed, or nothing to validate
//! - 1: Fatal error, or a configuration failed processing / parameter checks
//! - 2: Invalid arguments
//! - other: worst linter exit code

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stackgate_core::Validator;
use stackgate_lint::{CfnLint, TemplateLinter};

mod cli;
mod report;

use cli::{Cli, OutputFormat};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "stackgate=debug,warn"
    } else {
        "stackgate=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(ExitCodes::GENERAL_ERROR)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let options = cli.run_options();
    let text = cli.format == OutputFormat::Text;

    if text {
        println!("project_home_dir: {}", options.project_home.display());
    }

    let linter = CfnLint::new().with_binary(&cli.linter);
    if !linter.is_available().await {
        warn!("{} is not available; template linting will fail", linter.binary());
    }

    let validator = Validator::new(options, Arc::new(linter)).context("Failed to set up validator")?;
    let verbose = cli.verbose;

    let summary = validator
        .run_with(|outcome| {
            if text {
                report::print_outcome(outcome, verbose);
            }
        })
        .await
        .context("Validation run failed")?;

    if !summary.config_dir_found {
        info!("Nothing to validate in {:?}", summary.project_home);
        if text {
            println!("no config folder to process");
        } else {
            report::print_json(&summary)?;
        }
        return Ok(ExitCodes::SUCCESS);
    }

    if text {
        report::print_summary(&summary, verbose);
    } else {
        report::print_json(&summary)?;
    }

    Ok(summary.exit_code.clamp(0, u8::MAX as i32) as u8)
}
