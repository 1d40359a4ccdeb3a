use chrono::NaiveDate;
use serde::Serialize;

use crate::model::node::{ContentNode, NodeKind};
use crate::ops::palette::PaletteItem;
use crate::ops::query::TreeRow;
use crate::parse::toc::TocEntry;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct FileJson {
    pub path: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct TreeRowJson {
    pub path: String,
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub expanded: bool,
    pub matched: bool,
}

#[derive(Serialize)]
pub struct TocEntryJson {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

#[derive(Serialize)]
pub struct ShowJson {
    #[serde(flatten)]
    pub file: FileJson,
    pub toc: Vec<TocEntryJson>,
    pub body: String,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaletteItemJson {
    File {
        path: String,
        title: String,
        name: String,
        score: i32,
    },
    Tag {
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn file_to_json(node: &ContentNode) -> FileJson {
    FileJson {
        path: node.id.clone(),
        name: node.name.clone(),
        title: node.title.clone(),
        date: node.date,
        tags: node.tags.clone(),
        categories: node.categories.clone(),
    }
}

pub fn tree_row_to_json(row: &TreeRow, name: &str) -> TreeRowJson {
    TreeRowJson {
        path: row.id.clone(),
        name: name.to_string(),
        kind: row.kind,
        depth: row.depth,
        expanded: row.is_expanded,
        matched: row.direct_match,
    }
}

pub fn toc_entry_to_json(entry: &TocEntry) -> TocEntryJson {
    TocEntryJson {
        level: entry.level,
        text: entry.text.clone(),
        slug: entry.slug.clone(),
    }
}

pub fn palette_item_to_json(item: &PaletteItem) -> PaletteItemJson {
    match item {
        PaletteItem::File {
            id,
            title,
            name,
            score,
            ..
        } => PaletteItemJson::File {
            path: id.clone(),
            title: title.clone(),
            name: name.clone(),
            score: *score,
        },
        PaletteItem::Tag { name } => PaletteItemJson::Tag { name: name.clone() },
    }
}

// ---------------------------------------------------------------------------
// Text rendering helpers
// ---------------------------------------------------------------------------

/// Tree guide prefix for one explorer row (`│  ├─ └─`), built from the
/// row's ancestor metadata.
pub fn tree_guides(row: &TreeRow) -> String {
    let mut prefix = String::new();
    for &ancestor_was_last in &row.ancestor_last {
        prefix.push_str(if ancestor_was_last { "   " } else { "│  " });
    }
    prefix.push_str(if row.is_last_sibling {
        "└─ "
    } else {
        "├─ "
    });
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(depth: usize, ancestor_last: Vec<bool>, is_last: bool) -> TreeRow {
        TreeRow {
            id: "x".to_string(),
            depth,
            kind: NodeKind::File,
            has_children: false,
            is_expanded: false,
            direct_match: false,
            is_last_sibling: is_last,
            ancestor_last,
        }
    }

    #[test]
    fn test_tree_guides() {
        assert_eq!(tree_guides(&row(0, vec![], false)), "├─ ");
        assert_eq!(tree_guides(&row(0, vec![], true)), "└─ ");
        assert_eq!(tree_guides(&row(1, vec![false], true)), "│  └─ ");
        assert_eq!(tree_guides(&row(2, vec![true, false], false)), "   │  ├─ ");
    }
}
