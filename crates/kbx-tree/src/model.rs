//! # Workspace Nodes & Trees
//!
//! [`WorkspaceNode`] is a file or directory with a tagged state and an
//! ordered child list. [`WorkspaceTree`] owns the root node and provides
//! the full and filtered projections.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use kbx_core::workspace::sorted_entries;

/// Tagged node state. Expansion moves a directory `Unloaded → Loaded`
/// exactly once; `Leaf` and `Placeholder` never transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory whose children have not been materialized. Holds exactly
    /// one [`NodeKind::Placeholder`] child.
    Unloaded,
    /// A directory whose real, name-sorted children are materialized.
    Loaded,
    /// A file. Never has children.
    Leaf,
    /// Synthetic marker child of an `Unloaded` directory.
    Placeholder,
}

/// A file or directory in the workspace view.
#[derive(Debug, Clone)]
pub struct WorkspaceNode {
    path: PathBuf,
    kind: NodeKind,
    children: Vec<WorkspaceNode>,
}

impl WorkspaceNode {
    /// A directory node deferred for later expansion, seeded with its
    /// placeholder child.
    fn unloaded(path: PathBuf) -> Self {
        let placeholder = WorkspaceNode {
            path: path.clone(),
            kind: NodeKind::Placeholder,
            children: Vec::new(),
        };
        Self {
            path,
            kind: NodeKind::Unloaded,
            children: vec![placeholder],
        }
    }

    /// A file node.
    fn leaf(path: PathBuf) -> Self {
        Self {
            path,
            kind: NodeKind::Leaf,
            children: Vec::new(),
        }
    }

    /// A directory node whose children are already known.
    fn loaded(path: PathBuf, children: Vec<WorkspaceNode>) -> Self {
        Self {
            path,
            kind: NodeKind::Loaded,
            children,
        }
    }

    /// The absolute path this node represents.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node's tagged state.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The display label: the file name, or `...` for a placeholder.
    pub fn name(&self) -> String {
        if self.kind == NodeKind::Placeholder {
            return "...".to_string();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The node's children, in name order.
    pub fn children(&self) -> &[WorkspaceNode] {
        &self.children
    }

    /// True for `Unloaded` and `Loaded` directory nodes.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Unloaded | NodeKind::Loaded)
    }

    /// Materialize this directory's real children.
    ///
    /// For an `Unloaded` directory, replaces the placeholder with the
    /// name-sorted entries; each subdirectory is again placeholder-seeded.
    /// Idempotent: re-expanding a `Loaded` node is a no-op, as is calling
    /// this on a `Leaf` or `Placeholder`.
    ///
    /// A directory that cannot be listed becomes `Loaded` with zero
    /// children; the failure is logged, never propagated.
    pub fn expand(&mut self) {
        if self.kind != NodeKind::Unloaded {
            return;
        }
        self.children = list_children(&self.path);
        self.kind = NodeKind::Loaded;
    }

    /// Recursively expand this node and every directory below it,
    /// depth-first.
    pub fn expand_all(&mut self) {
        self.expand();
        for child in &mut self.children {
            if child.is_dir() {
                child.expand_all();
            }
        }
    }
}

/// The session's view over a workspace root.
#[derive(Debug, Clone)]
pub struct WorkspaceTree {
    root: WorkspaceNode,
}

impl WorkspaceTree {
    /// Materialize one level of children under `root`.
    ///
    /// The root node is created `Loaded`; each subdirectory under it is
    /// seeded with exactly one placeholder child so it can be expanded on
    /// demand. An unlistable root yields a loaded root with zero children.
    pub fn build(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let children = list_children(&root);
        Self {
            root: WorkspaceNode::loaded(root, children),
        }
    }

    /// Construct only the ancestor-directory chain of each matched file,
    /// plus the files themselves.
    ///
    /// Every directory node is created already `Loaded` — its full content
    /// is known up front, so no placeholders appear anywhere in a filtered
    /// tree. Matched paths outside `root` are ignored.
    pub fn build_filtered(root: impl Into<PathBuf>, matched_files: &[PathBuf]) -> Self {
        let root = root.into();
        let rels: Vec<Vec<OsString>> = matched_files
            .iter()
            .filter_map(|p| p.strip_prefix(&root).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_os_string())
                    .collect::<Vec<_>>()
            })
            .filter(|parts| !parts.is_empty())
            .collect();
        Self {
            root: build_filtered_dir(root, &rels),
        }
    }

    /// The root node.
    pub fn root(&self) -> &WorkspaceNode {
        &self.root
    }

    /// Mutable access to the root node, for expansion.
    pub fn root_mut(&mut self) -> &mut WorkspaceNode {
        &mut self.root
    }

    /// Recursively expand every directory in the tree, depth-first. Used
    /// after a filtered rebuild so matches are immediately visible.
    pub fn expand_all(&mut self) {
        self.root.expand_all();
    }
}

/// List a directory as child nodes: subdirectories deferred with a
/// placeholder, files as leaves, name-sorted. Unlistable directories yield
/// an empty list.
fn list_children(dir: &Path) -> Vec<WorkspaceNode> {
    let Some(entries) = sorted_entries(dir) else {
        return Vec::new();
    };
    entries
        .into_iter()
        .map(|path| {
            if path.is_dir() {
                WorkspaceNode::unloaded(path)
            } else {
                WorkspaceNode::leaf(path)
            }
        })
        .collect()
}

/// Pending content of a filtered directory, grouped by child name.
enum Pending {
    File,
    Dir(Vec<Vec<OsString>>),
}

fn build_filtered_dir(path: PathBuf, rels: &[Vec<OsString>]) -> WorkspaceNode {
    let mut pending: BTreeMap<OsString, Pending> = BTreeMap::new();
    for rel in rels {
        if rel.len() == 1 {
            pending.entry(rel[0].clone()).or_insert(Pending::File);
        } else {
            match pending
                .entry(rel[0].clone())
                .or_insert_with(|| Pending::Dir(Vec::new()))
            {
                Pending::Dir(tails) => tails.push(rel[1..].to_vec()),
                // A name cannot be both a file and a directory on disk; if
                // the match list claims otherwise, the file entry wins.
                Pending::File => {}
            }
        }
    }

    let children = pending
        .into_iter()
        .map(|(name, spec)| {
            let child_path = path.join(&name);
            match spec {
                Pending::File => WorkspaceNode::leaf(child_path),
                Pending::Dir(tails) => build_filtered_dir(child_path, &tails),
            }
        })
        .collect();

    WorkspaceNode::loaded(path, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(node: &WorkspaceNode) -> Vec<String> {
        node.children().iter().map(|c| c.name()).collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let people = dir.path().join("people");
        let places = dir.path().join("places");
        std::fs::create_dir_all(people.join("colonial")).unwrap();
        std::fs::create_dir_all(&places).unwrap();
        std::fs::write(dir.path().join("zz.Note.yml"), "text: hi").unwrap();
        std::fs::write(
            people.join("colonial").join("attucks.Person.yml"),
            "name: Crispus Attucks",
        )
        .unwrap();
        std::fs::write(places.join("boston.Place.yml"), "name: Boston").unwrap();
        dir
    }

    #[test]
    fn build_materializes_one_level_sorted() {
        let dir = fixture();
        let tree = WorkspaceTree::build(dir.path());

        assert_eq!(tree.root().kind(), NodeKind::Loaded);
        assert_eq!(names(tree.root()), vec!["people", "places", "zz.Note.yml"]);
    }

    #[test]
    fn subdirectories_seeded_with_exactly_one_placeholder() {
        let dir = fixture();
        let tree = WorkspaceTree::build(dir.path());

        for child in tree.root().children() {
            if child.is_dir() {
                assert_eq!(child.kind(), NodeKind::Unloaded);
                assert_eq!(child.children().len(), 1);
                assert_eq!(child.children()[0].kind(), NodeKind::Placeholder);
                assert_eq!(child.children()[0].name(), "...");
            }
        }
    }

    #[test]
    fn file_nodes_never_have_children() {
        let dir = fixture();
        let mut tree = WorkspaceTree::build(dir.path());
        tree.expand_all();

        fn check(node: &WorkspaceNode) {
            if node.kind() == NodeKind::Leaf {
                assert!(node.children().is_empty());
            }
            for child in node.children() {
                check(child);
            }
        }
        check(tree.root());
    }

    #[test]
    fn expand_replaces_placeholder_with_real_children() {
        let dir = fixture();
        let mut tree = WorkspaceTree::build(dir.path());

        let people = &mut tree.root_mut().children[0];
        assert_eq!(people.name(), "people");
        people.expand();

        assert_eq!(people.kind(), NodeKind::Loaded);
        assert_eq!(names(people), vec!["colonial"]);
        assert_eq!(people.children()[0].kind(), NodeKind::Unloaded);
    }

    #[test]
    fn expand_is_idempotent() {
        let dir = fixture();
        let mut tree = WorkspaceTree::build(dir.path());

        let people = &mut tree.root_mut().children[0];
        people.expand();
        let once = names(people);
        people.expand();
        assert_eq!(names(people), once);
        assert_eq!(people.kind(), NodeKind::Loaded);
    }

    #[test]
    fn expand_unlistable_directory_yields_zero_children() {
        let dir = tempfile::tempdir().unwrap();
        let ghost = dir.path().join("ghost");
        std::fs::create_dir(&ghost).unwrap();

        let mut tree = WorkspaceTree::build(dir.path());
        std::fs::remove_dir(&ghost).unwrap();

        let node = &mut tree.root_mut().children[0];
        node.expand();
        assert_eq!(node.kind(), NodeKind::Loaded);
        assert!(node.children().is_empty());
    }

    #[test]
    fn expanded_empty_directory_distinguishable_from_unexpanded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let mut tree = WorkspaceTree::build(dir.path());
        let node = &mut tree.root_mut().children[0];
        // Before expansion: placeholder present.
        assert_eq!(node.children().len(), 1);
        node.expand();
        // After expansion: genuinely empty.
        assert!(node.children().is_empty());
        assert_eq!(node.kind(), NodeKind::Loaded);
    }

    #[test]
    fn hidden_entries_listed_like_any_other() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden.Note.yml"), "text: x").unwrap();
        std::fs::write(dir.path().join("plain.Note.yml"), "text: y").unwrap();

        let tree = WorkspaceTree::build(dir.path());
        assert_eq!(names(tree.root()), vec![".hidden.Note.yml", "plain.Note.yml"]);
    }

    #[test]
    fn expand_all_materializes_every_level() {
        let dir = fixture();
        let mut tree = WorkspaceTree::build(dir.path());
        tree.expand_all();

        fn no_placeholders(node: &WorkspaceNode) {
            assert_ne!(node.kind(), NodeKind::Unloaded);
            assert_ne!(node.kind(), NodeKind::Placeholder);
            for child in node.children() {
                no_placeholders(child);
            }
        }
        no_placeholders(tree.root());

        let people = &tree.root().children()[0];
        let colonial = &people.children()[0];
        assert_eq!(names(colonial), vec!["attucks.Person.yml"]);
    }

    #[test]
    fn filtered_tree_contains_only_ancestor_chains() {
        let dir = fixture();
        let matched = vec![dir
            .path()
            .join("people")
            .join("colonial")
            .join("attucks.Person.yml")];

        let tree = WorkspaceTree::build_filtered(dir.path(), &matched);

        assert_eq!(names(tree.root()), vec!["people"]);
        let people = &tree.root().children()[0];
        assert_eq!(people.kind(), NodeKind::Loaded);
        assert_eq!(names(people), vec!["colonial"]);
        let colonial = &people.children()[0];
        assert_eq!(names(colonial), vec!["attucks.Person.yml"]);
        assert_eq!(colonial.children()[0].kind(), NodeKind::Leaf);
    }

    #[test]
    fn filtered_tree_has_no_placeholders() {
        let dir = fixture();
        let matched = vec![
            dir.path()
                .join("people")
                .join("colonial")
                .join("attucks.Person.yml"),
            dir.path().join("places").join("boston.Place.yml"),
        ];

        let tree = WorkspaceTree::build_filtered(dir.path(), &matched);

        fn check(node: &WorkspaceNode) {
            assert_ne!(node.kind(), NodeKind::Placeholder);
            assert_ne!(node.kind(), NodeKind::Unloaded);
            for child in node.children() {
                check(child);
            }
        }
        check(tree.root());
    }

    #[test]
    fn filtered_tree_leaf_files_are_exactly_the_matches() {
        let dir = fixture();
        let matched = vec![
            dir.path().join("places").join("boston.Place.yml"),
            dir.path().join("zz.Note.yml"),
        ];

        let tree = WorkspaceTree::build_filtered(dir.path(), &matched);

        let mut leaves = Vec::new();
        fn collect(node: &WorkspaceNode, acc: &mut Vec<PathBuf>) {
            if node.kind() == NodeKind::Leaf {
                acc.push(node.path().to_path_buf());
            }
            for child in node.children() {
                collect(child, acc);
            }
        }
        collect(tree.root(), &mut leaves);

        let mut expected = matched.clone();
        expected.sort();
        leaves.sort();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn filtered_tree_ignores_paths_outside_root() {
        let dir = fixture();
        let other = tempfile::tempdir().unwrap();
        let matched = vec![
            other.path().join("foreign.Note.yml"),
            dir.path().join("zz.Note.yml"),
        ];

        let tree = WorkspaceTree::build_filtered(dir.path(), &matched);
        assert_eq!(names(tree.root()), vec!["zz.Note.yml"]);
    }

    #[test]
    fn filtered_tree_merges_siblings_in_name_order() {
        let dir = fixture();
        let matched = vec![
            dir.path().join("zz.Note.yml"),
            dir.path()
                .join("people")
                .join("colonial")
                .join("attucks.Person.yml"),
            dir.path().join("places").join("boston.Place.yml"),
        ];

        let tree = WorkspaceTree::build_filtered(dir.path(), &matched);
        assert_eq!(names(tree.root()), vec!["people", "places", "zz.Note.yml"]);
    }

    #[test]
    fn expand_all_on_filtered_tree_is_a_no_op() {
        let dir = fixture();
        let matched = vec![dir.path().join("places").join("boston.Place.yml")];

        let mut tree = WorkspaceTree::build_filtered(dir.path(), &matched);
        let before = format!("{:?}", tree.root());
        tree.expand_all();
        assert_eq!(format!("{:?}", tree.root()), before);
    }
}
