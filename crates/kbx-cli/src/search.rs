//! # Search Subcommand
//!
//! Batch scan of every entity file in the workspace, printing per-file
//! match groups with property context and the term highlighted.

use clap::Args;

use kbx_core::WorkspaceContext;
use kbx_search::{scan_workspace, MatchRecord};

use crate::{display_path, paint_matches};

/// Arguments for the `kbx search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term (quotes allowed by the shell).
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Show absolute file paths in results instead of workspace-relative
    /// paths.
    #[arg(short = 'f', long)]
    pub full_path: bool,

    /// Show line numbers in results.
    #[arg(short, long)]
    pub lines: bool,
}

/// Execute the search subcommand. Returns exit code 0; an empty result is
/// reported, not an error.
pub fn run_search(args: &SearchArgs, ctx: &WorkspaceContext) -> anyhow::Result<u8> {
    tracing::info!(term = %args.term, root = %ctx.root().display(), "searching workspace");

    let results = scan_workspace(ctx.root(), &args.term);
    if results.is_empty() {
        println!("No matches found for: {}", args.term);
        return Ok(0);
    }

    for file in &results {
        println!("\n{}", display_path(&file.path, ctx.root(), args.full_path));
        for record in &file.matches {
            println!("{}", match_line(record, &args.term, args.lines));
        }
    }
    Ok(0)
}

/// One printed match line. A record with no remembered property context
/// renders `-` in the property position.
fn match_line(record: &MatchRecord, term: &str, lines: bool) -> String {
    let property = record.property.as_deref().unwrap_or("-");
    let text = paint_matches(&record.text, term);
    if lines {
        format!("- Line {}, {}: {}", record.line, property, text)
    } else {
        format!("- {}: {}", property, text)
    }
}
