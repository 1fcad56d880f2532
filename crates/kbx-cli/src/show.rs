//! # Show Subcommand
//!
//! Renders one entity file for reading: mappings and sequences indented by
//! depth, scalar values with the search term highlighted. Unreadable or
//! malformed files render as an inline error line, never a crash — the
//! viewing surface tolerates bad files the same way browsing does.

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;

use kbx_core::WorkspaceContext;
use kbx_search::format_content;

/// Arguments for the `kbx show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entity file to render, absolute or relative to the workspace root.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Highlight occurrences of this term in scalar values.
    #[arg(short, long)]
    pub term: Option<String>,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, ctx: &WorkspaceContext) -> anyhow::Result<u8> {
    let path = resolve_file(&args.file, ctx.root());
    let term = args.term.as_deref().unwrap_or("");

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            println!("{}", format!("Failed to read {}: {e}", path.display()).red());
            return Ok(0);
        }
    };
    let value: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            println!(
                "{}",
                format!("Malformed content in {}: {e}", path.display()).red()
            );
            return Ok(0);
        }
    };

    let (open, close) = highlight_markers();
    println!("{}", format_content(&value, term, open, close));
    Ok(0)
}

/// A path given on the command line may be workspace-relative.
fn resolve_file(file: &Path, root: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    let under_root = root.join(file);
    if under_root.exists() {
        under_root
    } else {
        file.to_path_buf()
    }
}

/// ANSI bold-red markers when color is enabled, nothing otherwise.
fn highlight_markers() -> (&'static str, &'static str) {
    if colored::control::SHOULD_COLORIZE.should_colorize() {
        ("\u{1b}[1;31m", "\u{1b}[0m")
    } else {
        ("", "")
    }
}
