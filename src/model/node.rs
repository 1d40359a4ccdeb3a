use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a node is a file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One node in the content tree.
///
/// Nodes live in a flat arena keyed by `id` and reference each other by id
/// (`parent_id`, `children`) rather than by ownership, so the tree can be
/// mutated and randomly addressed without reference cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    /// Normalized relative path (`posts/rust/intro.md`; root is `/`)
    pub id: String,
    /// Display name: the last path segment (files keep their extension)
    pub name: String,
    pub kind: NodeKind,
    /// `None` only for the root
    pub parent_id: Option<String>,
    /// Child ids in display order. Folders only; files keep this empty.
    pub children: Vec<String>,
    /// Explorer expand/collapse flag. Folders only.
    pub is_expanded: bool,
    /// Display title: front-matter `title`, defaulting to the file stem
    pub title: String,
    /// Body text (after front-matter). Files only.
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    /// Hierarchical category path, in order
    pub categories: Vec<String>,
}

impl ContentNode {
    /// Create a folder node with no children yet
    pub fn folder(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>) -> Self {
        let name = name.into();
        ContentNode {
            id: id.into(),
            title: name.clone(),
            name,
            kind: NodeKind::Folder,
            parent_id,
            children: Vec::new(),
            is_expanded: false,
            content: None,
            date: None,
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Create a file node with no metadata; the loader fills in the rest
    pub fn file(id: impl Into<String>, name: impl Into<String>, parent_id: String) -> Self {
        let name = name.into();
        let stem = name.rsplit_once('.').map_or(name.as_str(), |(s, _)| s);
        ContentNode {
            id: id.into(),
            title: stem.to_string(),
            name,
            kind: NodeKind::File,
            parent_id: Some(parent_id),
            children: Vec::new(),
            is_expanded: false,
            content: None,
            date: None,
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// True when the node's own `tags` or `categories` contain `tag`
    pub fn carries_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag) || self.categories.iter().any(|c| c == tag)
    }
}
