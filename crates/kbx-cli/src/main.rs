//! # kbx CLI entry point
//!
//! Parses command-line arguments with clap derive macros, resolves the
//! workspace context once, and dispatches to subcommand handlers. The
//! `Commands` enum is the static command table: name, description, and
//! argument spec per subcommand, built at compile time.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kbx_cli::browse::{run_browse, BrowseArgs};
use kbx_cli::search::{run_search, SearchArgs};
use kbx_cli::show::{run_show, ShowArgs};
use kbx_cli::validate::{run_validate, ValidateArgs};
use kbx_core::WorkspaceContext;

/// kbx — browse, search, and validate a workspace of YAML entity files.
///
/// Entity files are named `<name>.<SchemaName>.yml`; a sibling `schema/`
/// directory holds `<SchemaName>.json` documents plus shared sub-schemas
/// under `schema/subtypes/`.
#[derive(Parser, Debug)]
#[command(name = "kbx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Workspace root directory (defaults to the current directory).
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Override the schema directory (defaults to the workspace root's
    /// `schema/` sibling).
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the workspace tree, optionally filtered by a search term.
    Browse(BrowseArgs),

    /// Render one entity file with optional term highlighting.
    Show(ShowArgs),

    /// Search entity files for a term, with property context.
    Search(SearchArgs),

    /// Validate every entity file against its schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = resolve_context(cli.workspace, cli.schema_dir).and_then(|ctx| {
        tracing::debug!(root = %ctx.root().display(), "resolved workspace");
        match cli.command {
            Commands::Browse(args) => run_browse(&args, &ctx),
            Commands::Show(args) => run_show(&args, &ctx),
            Commands::Search(args) => run_search(&args, &ctx),
            Commands::Validate(args) => run_validate(&args, &ctx),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Build the workspace context from the global options. An unusable root
/// is a configuration problem and aborts the process.
fn resolve_context(
    workspace: Option<PathBuf>,
    schema_dir: Option<PathBuf>,
) -> anyhow::Result<WorkspaceContext> {
    use anyhow::Context;

    let root = match workspace {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let mut ctx = WorkspaceContext::new(root).context("invalid workspace root")?;
    if let Some(schema_dir) = schema_dir {
        ctx = ctx.with_schema_dir(schema_dir);
    }
    Ok(ctx)
}
