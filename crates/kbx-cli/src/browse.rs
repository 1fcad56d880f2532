//! # Browse Subcommand
//!
//! Non-interactive projection of the workspace tree. Without a term the
//! full tree is printed; with a term, only the ancestor chains of files
//! whose content matches, fully expanded so every match is visible.

use clap::Args;

use kbx_core::WorkspaceContext;
use kbx_search::locate;
use kbx_tree::{WorkspaceNode, WorkspaceTree};

/// Arguments for the `kbx browse` subcommand.
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Filter the tree to files whose content contains this term.
    #[arg(short, long)]
    pub term: Option<String>,
}

/// Execute the browse subcommand.
pub fn run_browse(args: &BrowseArgs, ctx: &WorkspaceContext) -> anyhow::Result<u8> {
    let mut tree = match &args.term {
        Some(term) => {
            let matched = locate(ctx.root(), term);
            tracing::info!(term = %term, files = matched.len(), "filtered rebuild");
            if matched.is_empty() {
                println!("No matches found for: {term}");
                return Ok(0);
            }
            WorkspaceTree::build_filtered(ctx.root(), &matched)
        }
        None => WorkspaceTree::build(ctx.root()),
    };
    tree.expand_all();

    println!("{}", ctx.root().display());
    let mut out = String::new();
    for child in tree.root().children() {
        render(child, 1, &mut out);
    }
    print!("{out}");
    Ok(0)
}

/// Append one node and its subtree as indented lines, depth-first.
fn render(node: &WorkspaceNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.name());
    if node.is_dir() {
        out.push('/');
    }
    out.push('\n');
    for child in node.children() {
        render(child, depth + 1, out);
    }
}
