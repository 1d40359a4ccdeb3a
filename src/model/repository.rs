use indexmap::IndexMap;

use super::node::{ContentNode, NodeKind};

/// Normalize a relative path into a node id: backslashes become slashes,
/// empty and `.` segments are dropped. The result is `""` for a path with no
/// real segments.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// The in-memory content tree: a flat arena of nodes indexed by id.
///
/// Insertion order is preserved (and made deterministic by the loader), so
/// every projection derived from the repository is stable across reloads of
/// the same sources. An empty repository is a valid state: every query must
/// tolerate being asked before any content has loaded.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    nodes: IndexMap<String, ContentNode>,
    root_id: Option<String>,
}

impl Repository {
    pub fn new() -> Self {
        Repository::default()
    }

    /// Insert a node, replacing any node with the same id
    pub fn insert(&mut self, node: ContentNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn set_root(&mut self, id: impl Into<String>) {
        self.root_id = Some(id.into());
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    pub fn root(&self) -> Option<&ContentNode> {
        self.nodes.get(self.root_id.as_deref()?)
    }

    pub fn get(&self, id: &str) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ContentNode> {
        self.nodes.get_mut(id)
    }

    /// Look up a node by a raw (possibly unnormalized) relative path
    pub fn resolve(&self, path: &str) -> Option<&ContentNode> {
        self.get(&normalize_path(path))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Child ids of a folder, in display order. Empty for files and unknown ids.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }

    /// All file nodes in insertion order
    pub fn files(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values().filter(|n| n.kind == NodeKind::File)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
