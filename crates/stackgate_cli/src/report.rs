//! Console output for validation results.

use anyhow::{Context, Result};
use stackgate_core::{ProcessOutcome, RunSummary};

/// Print one finished configuration in text mode.
pub fn print_outcome(outcome: &ProcessOutcome, verbose: bool) {
    if outcome.passed() {
        if verbose {
            println!("✅ [{}] passed", outcome.config.display());
            let notes = outcome.lint_output();
            if !notes.is_empty() {
                println!("{}", notes);
            }
        }
        return;
    }

    println!();
    println!("Validation failed for [{}] with following errors:", outcome.config.display());
    println!("{}", outcome.report());
}

/// Print the closing summary in text mode.
pub fn print_summary(summary: &RunSummary, verbose: bool) {
    let failed = summary.failures().count();
    if !verbose && failed == 0 {
        return;
    }

    println!();
    println!(
        "Validated {} config files: {} passed, {} failed ({}ms)",
        summary.outcomes.len(),
        summary.passed_count(),
        failed,
        summary.duration_ms
    );

    if summary.passed() {
        println!("✅ All configurations passed");
    } else {
        println!("❌ Some configurations failed. Please fix the issues above.");
    }
}

pub fn print_json(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
