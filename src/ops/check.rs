use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::node::NodeKind;
use crate::model::repository::Repository;

/// Structured result from `desk check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A tree-invariant violation (something the loader should never produce).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// A non-empty repository has no root, or the root id doesn't resolve
    #[serde(rename = "missing_root")]
    MissingRoot,
    /// A folder's children list references an id that doesn't exist
    #[serde(rename = "unknown_child")]
    UnknownChild { folder_id: String, child_id: String },
    /// An id appears in the children of more than one folder
    #[serde(rename = "multiple_owners")]
    MultipleOwners {
        child_id: String,
        folder_ids: Vec<String>,
    },
    /// A node is not reachable from the root via children links
    #[serde(rename = "unreachable")]
    Unreachable { id: String },
    /// A node's parent_id disagrees with the folder that lists it
    #[serde(rename = "parent_mismatch")]
    ParentMismatch {
        id: String,
        parent_id: String,
        owner_id: String,
    },
    /// A file node carries children
    #[serde(rename = "file_with_children")]
    FileWithChildren { id: String },
    /// A folder node carries body content
    #[serde(rename = "folder_with_content")]
    FolderWithContent { id: String },
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckError::MissingRoot => write!(f, "repository has no resolvable root"),
            CheckError::UnknownChild {
                folder_id,
                child_id,
            } => write!(f, "{} lists unknown child {}", folder_id, child_id),
            CheckError::MultipleOwners {
                child_id,
                folder_ids,
            } => write!(f, "{} owned by {}", child_id, folder_ids.join(" and ")),
            CheckError::Unreachable { id } => write!(f, "{} is unreachable from the root", id),
            CheckError::ParentMismatch {
                id,
                parent_id,
                owner_id,
            } => write!(
                f,
                "{} claims parent {} but is listed by {}",
                id, parent_id, owner_id
            ),
            CheckError::FileWithChildren { id } => write!(f, "file {} carries children", id),
            CheckError::FolderWithContent { id } => write!(f, "folder {} carries content", id),
        }
    }
}

/// A non-critical oddity.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// File has no front-matter date, so the dashboard sorts it last
    #[serde(rename = "undated_file")]
    UndatedFile { id: String },
    /// Folder with no children
    #[serde(rename = "empty_folder")]
    EmptyFolder { id: String },
}

impl std::fmt::Display for CheckWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckWarning::UndatedFile { id } => write!(f, "{} has no date", id),
            CheckWarning::EmptyFolder { id } => write!(f, "{} is an empty folder", id),
        }
    }
}

/// Validate the repository's tree invariants.
///
/// Read-only. An empty repository is valid (the pre-load state). Checks:
/// exactly one resolvable root; every child id resolves; single ownership
/// (which also rules out cycles reachable from the root); parent/child
/// agreement; files never carry children; folders never carry content; all
/// nodes reachable from the root.
pub fn check_repository(repo: &Repository) -> CheckResult {
    let mut result = CheckResult::default();

    if repo.is_empty() {
        result.valid = true;
        return result;
    }

    let root_id = match repo.root_id() {
        Some(id) if repo.contains(id) => Some(id.to_string()),
        _ => {
            result.errors.push(CheckError::MissingRoot);
            None
        }
    };

    // Ownership map: child id -> owning folder ids
    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in repo.nodes() {
        match node.kind {
            NodeKind::Folder => {
                if node.content.is_some() {
                    result.errors.push(CheckError::FolderWithContent {
                        id: node.id.clone(),
                    });
                }
                if node.children.is_empty() {
                    result.warnings.push(CheckWarning::EmptyFolder {
                        id: node.id.clone(),
                    });
                }
            }
            NodeKind::File => {
                if !node.children.is_empty() {
                    result.errors.push(CheckError::FileWithChildren {
                        id: node.id.clone(),
                    });
                }
                if node.date.is_none() {
                    result.warnings.push(CheckWarning::UndatedFile {
                        id: node.id.clone(),
                    });
                }
            }
        }
        for child in &node.children {
            if !repo.contains(child) {
                result.errors.push(CheckError::UnknownChild {
                    folder_id: node.id.clone(),
                    child_id: child.clone(),
                });
            }
            owners.entry(child.as_str()).or_default().push(&node.id);
        }
    }

    for (child, folders) in &owners {
        if folders.len() > 1 {
            result.errors.push(CheckError::MultipleOwners {
                child_id: child.to_string(),
                folder_ids: folders.iter().map(|f| f.to_string()).collect(),
            });
        }
        if let Some(node) = repo.get(child) {
            let owner = folders[0];
            if node.parent_id.as_deref() != Some(owner) {
                result.errors.push(CheckError::ParentMismatch {
                    id: child.to_string(),
                    parent_id: node.parent_id.clone().unwrap_or_default(),
                    owner_id: owner.to_string(),
                });
            }
        }
    }

    // Reachability walk from the root. The visited set terminates the walk
    // even on a cyclic graph, which then shows up as unreachable or
    // multiply-owned nodes above.
    if let Some(root_id) = root_id {
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack = vec![root_id];
        while let Some(id) = stack.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            for child in repo.children_of(&id) {
                stack.push(child.clone());
            }
        }
        for node in repo.nodes() {
            if !visited.contains(&node.id) {
                result.errors.push(CheckError::Unreachable {
                    id: node.id.clone(),
                });
            }
        }
    }

    result.valid = result.errors.is_empty();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::loader::{SourceFile, build_repository};
    use crate::model::node::ContentNode;

    fn loaded_repo() -> Repository {
        build_repository(&[
            SourceFile {
                path: "a.md".to_string(),
                text: "---\ndate: 2024-01-01\n---\nbody".to_string(),
            },
            SourceFile {
                path: "posts/b.md".to_string(),
                text: "---\ndate: 2024-01-02\n---\nbody".to_string(),
            },
        ])
    }

    #[test]
    fn test_loader_output_is_valid() {
        let result = check_repository(&loaded_repo());
        assert!(result.valid, "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_repository_is_valid() {
        assert!(check_repository(&Repository::new()).valid);
    }

    #[test]
    fn test_missing_root() {
        let mut repo = Repository::new();
        repo.insert(ContentNode::file("a.md", "a.md", "/".to_string()));
        let result = check_repository(&repo);
        assert!(!result.valid);
        assert!(matches!(result.errors[0], CheckError::MissingRoot));
    }

    #[test]
    fn test_unknown_child() {
        let mut repo = loaded_repo();
        repo.get_mut("posts").unwrap().children.push("ghost.md".to_string());
        let result = check_repository(&repo);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, CheckError::UnknownChild { child_id, .. } if child_id == "ghost.md")));
    }

    #[test]
    fn test_multiple_owners() {
        let mut repo = loaded_repo();
        repo.get_mut("posts").unwrap().children.push("a.md".to_string());
        let result = check_repository(&repo);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, CheckError::MultipleOwners { child_id, .. } if child_id == "a.md")));
    }

    #[test]
    fn test_unreachable_node() {
        let mut repo = loaded_repo();
        repo.insert(ContentNode::file(
            "orphan.md",
            "orphan.md",
            "/".to_string(),
        ));
        let result = check_repository(&repo);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, CheckError::Unreachable { id } if id == "orphan.md")));
    }

    #[test]
    fn test_file_with_children_and_folder_with_content() {
        let mut repo = loaded_repo();
        repo.get_mut("a.md").unwrap().children.push("posts/b.md".to_string());
        repo.get_mut("posts").unwrap().content = Some("body".to_string());
        let result = check_repository(&repo);
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, CheckError::FileWithChildren { id } if id == "a.md")));
        assert!(result
            .errors
            .iter()
            .any(|e| matches!(e, CheckError::FolderWithContent { id } if id == "posts")));
    }

    #[test]
    fn test_undated_file_warns() {
        let repo = build_repository(&[SourceFile {
            path: "undated.md".to_string(),
            text: "no front matter".to_string(),
        }]);
        let result = check_repository(&repo);
        assert!(result.valid);
        assert!(matches!(
            result.warnings[0],
            CheckWarning::UndatedFile { .. }
        ));
    }
}
