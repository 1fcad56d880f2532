//! # Validate Subcommand
//!
//! Validates every entity file against its schema and prints each result.
//! The batch always exits 0: every pass and failure is reported, and the
//! exit code does not depend on individual outcomes. Callers that need a
//! failure-sensitive signal read the printed report.

use clap::Args;
use colored::Colorize;

use kbx_core::WorkspaceContext;
use kbx_schema::validate_workspace;

use crate::display_path;

/// Arguments for the `kbx validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Show absolute file paths in results instead of workspace-relative
    /// paths.
    #[arg(short = 'f', long)]
    pub full_path: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 regardless of per-entity failures; a non-zero exit
/// is reserved for store assembly problems surfaced through the error.
pub fn run_validate(args: &ValidateArgs, ctx: &WorkspaceContext) -> anyhow::Result<u8> {
    use anyhow::Context;

    let report = validate_workspace(ctx).context("failed to assemble schema store")?;

    for outcome in &report.outcomes {
        let path = display_path(&outcome.path, ctx.root(), args.full_path);
        match &outcome.result {
            Ok(()) => println!("{} {}", "[OK]".green(), path),
            Err(e) => println!("\n{} {}:\n       {}\n", "[FAIL]".red(), path, e),
        }
    }

    println!(
        "\nEntities: {}/{} passed",
        report.passed(),
        report.total()
    );
    Ok(0)
}
