//! Pure projections over (repository, session state).
//!
//! Nothing here mutates its inputs; every function is recomputable on any
//! state change and safe against an empty repository.

use std::collections::BTreeSet;

use crate::model::node::{ContentNode, NodeKind};
use crate::model::repository::Repository;

/// Whether a node shows up in the explorer under the given tag filter.
///
/// No filter: everything is visible. With a filter, a file is visible iff
/// its own tags or categories carry the tag, and a folder is visible iff
/// some descendant file does. That is what keeps ancestor folders on screen
/// for a tag they don't carry themselves.
pub fn visible_under_filter(repo: &Repository, id: &str, tag: Option<&str>) -> bool {
    let Some(tag) = tag else {
        return true;
    };
    let Some(node) = repo.get(id) else {
        return false;
    };
    match node.kind {
        NodeKind::File => node.carries_tag(tag),
        NodeKind::Folder => node
            .children
            .iter()
            .any(|child| visible_under_filter(repo, child, Some(tag))),
    }
}

/// Whether a file's own metadata carries the tag. Drives match highlighting,
/// as opposed to mere ancestor visibility. Always false for folders.
pub fn matches_filter_directly(repo: &Repository, id: &str, tag: &str) -> bool {
    repo.get(id)
        .is_some_and(|n| n.kind == NodeKind::File && n.carries_tag(tag))
}

/// All distinct tag strings across file nodes, sorted for display.
pub fn collect_all_tags(repo: &Repository) -> Vec<String> {
    let set: BTreeSet<&str> = repo
        .files()
        .flat_map(|f| f.tags.iter().map(|t| t.as_str()))
        .collect();
    set.into_iter().map(|t| t.to_string()).collect()
}

/// Files whose display name or any tag contains `query`, case-insensitively.
/// The empty query matches everything (vacuous substring), so it returns the
/// full file list in repository order.
pub fn search_files<'a>(repo: &'a Repository, query: &str) -> Vec<&'a ContentNode> {
    let needle = query.to_lowercase();
    repo.files()
        .filter(|f| {
            f.name.to_lowercase().contains(&needle)
                || f.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

/// One row of the flattened explorer projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub has_children: bool,
    /// Effective expansion: folders auto-expand while a filter is active
    pub is_expanded: bool,
    /// The file itself carries the active tag (highlight state)
    pub direct_match: bool,
    pub is_last_sibling: bool,
    /// For tree guides: whether each ancestor was the last among its siblings
    pub ancestor_last: Vec<bool>,
}

/// Flatten the explorer tree into visible rows, respecting each folder's
/// expand/collapse flag. While a tag filter is active, only visible nodes
/// appear and their folders are auto-expanded.
pub fn tree_rows(repo: &Repository, filter: Option<&str>) -> Vec<TreeRow> {
    flatten(repo, filter, false)
}

/// Like [`tree_rows`] but with every folder treated as expanded: the whole
/// (filtered) tree at once, for non-interactive consumers.
pub fn tree_rows_expanded(repo: &Repository, filter: Option<&str>) -> Vec<TreeRow> {
    flatten(repo, filter, true)
}

fn flatten(repo: &Repository, filter: Option<&str>, expand_all: bool) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    if let Some(root_id) = repo.root_id() {
        flatten_children(repo, root_id, filter, expand_all, 0, &[], &mut rows);
    }
    rows
}

fn flatten_children(
    repo: &Repository,
    folder_id: &str,
    filter: Option<&str>,
    expand_all: bool,
    depth: usize,
    ancestor_last: &[bool],
    rows: &mut Vec<TreeRow>,
) {
    let visible: Vec<&ContentNode> = repo
        .children_of(folder_id)
        .iter()
        .filter_map(|id| repo.get(id))
        .filter(|n| visible_under_filter(repo, &n.id, filter))
        .collect();

    let count = visible.len();
    for (i, node) in visible.into_iter().enumerate() {
        let is_last = i == count - 1;
        let is_folder = node.kind == NodeKind::Folder;
        let expanded = is_folder && (expand_all || filter.is_some() || node.is_expanded);

        rows.push(TreeRow {
            id: node.id.clone(),
            depth,
            kind: node.kind,
            has_children: !node.children.is_empty(),
            is_expanded: expanded,
            direct_match: filter.is_some_and(|t| matches_filter_directly(repo, &node.id, t)),
            is_last_sibling: is_last,
            ancestor_last: ancestor_last.to_vec(),
        });

        if expanded {
            let mut next_ancestors = ancestor_last.to_vec();
            next_ancestors.push(is_last);
            flatten_children(
                repo,
                &node.id,
                filter,
                expand_all,
                depth + 1,
                &next_ancestors,
                rows,
            );
        }
    }
}

/// The dashboard feed: files sorted by date descending (undated last, ties
/// broken by title), narrowed by the tag filter, truncated to `limit`.
pub fn recent_files<'a>(
    repo: &'a Repository,
    filter: Option<&str>,
    limit: usize,
) -> Vec<&'a ContentNode> {
    let mut files: Vec<&ContentNode> = repo
        .files()
        .filter(|f| filter.is_none_or(|t| f.carries_tag(t)))
        .collect();

    files.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da).then_with(|| a.title.cmp(&b.title)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });
    files.truncate(limit);
    files
}
