use std::fs;
use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::model::node::{ContentNode, NodeKind};
use crate::model::repository::{Repository, normalize_path};
use crate::model::workspace::Workspace;
use crate::parse::front_matter::parse_source;

/// Extensions treated as content sources
const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Id of the synthetic root folder
pub const ROOT_ID: &str = "/";

/// One raw content source: a relative path and its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

/// A source that could not be loaded. The rest of the repository still
/// loads; partial availability is a normal state, not an exceptional one.
#[derive(Debug, Clone)]
pub struct LoadIssue {
    pub path: PathBuf,
    pub reason: String,
}

/// Error type for whole-load failures (per-source failures become
/// [`LoadIssue`]s instead)
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("not a content directory: {0}")]
    NotADirectory(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Build a repository from raw sources.
///
/// Pure and idempotent: the same sources always produce the same arena.
/// Folder nodes are derived from path prefixes and deduplicated by
/// normalized path, so two files under one directory share a folder node.
/// A later source with the same path as an earlier one replaces it.
pub fn build_repository(sources: &[SourceFile]) -> Repository {
    let mut repo = Repository::new();
    repo.insert(ContentNode::folder(ROOT_ID, "/", None));
    repo.set_root(ROOT_ID);

    for source in sources {
        let id = normalize_path(&source.path);
        if id.is_empty() {
            continue;
        }
        let segments: Vec<&str> = id.split('/').collect();

        // Ensure the folder chain above the file
        let mut parent_id = ROOT_ID.to_string();
        for k in 1..segments.len() {
            let folder_id = segments[..k].join("/");
            if !repo.contains(&folder_id) {
                repo.insert(ContentNode::folder(
                    &folder_id,
                    segments[k - 1],
                    Some(parent_id.clone()),
                ));
                link_child(&mut repo, &parent_id, &folder_id);
            }
            parent_id = folder_id;
        }

        let name = segments[segments.len() - 1];
        let already_present = repo.contains(&id);
        let mut node = ContentNode::file(&id, name, parent_id.clone());

        let parsed = parse_source(&source.text);
        if let Some(title) = parsed.front.title {
            node.title = title;
        }
        node.date = parsed.front.date;
        node.tags = parsed.front.tags;
        node.categories = parsed.front.categories;
        node.content = Some(parsed.body);

        repo.insert(node);
        if !already_present {
            link_child(&mut repo, &parent_id, &id);
        }
    }

    sort_children_for_display(&mut repo);
    repo
}

fn link_child(repo: &mut Repository, parent_id: &str, child_id: &str) {
    if let Some(parent) = repo.get_mut(parent_id) {
        parent.children.push(child_id.to_string());
    }
}

/// Display order: folders first, then files, case-insensitive alphabetical
/// within each group.
fn sort_children_for_display(repo: &mut Repository) {
    let folder_ids: Vec<String> = repo
        .nodes()
        .filter(|n| n.kind == NodeKind::Folder)
        .map(|n| n.id.clone())
        .collect();

    for folder_id in folder_ids {
        let mut keyed: Vec<(bool, String, String)> = repo
            .children_of(&folder_id)
            .iter()
            .filter_map(|id| repo.get(id))
            .map(|n| (n.kind == NodeKind::File, n.name.to_lowercase(), n.id.clone()))
            .collect();
        keyed.sort();
        if let Some(folder) = repo.get_mut(&folder_id) {
            folder.children = keyed.into_iter().map(|(_, _, id)| id).collect();
        }
    }
}

/// Load every content source under `dir` into a repository.
///
/// Walks the directory recursively, taking files with a content extension
/// and skipping dot-entries. An entry that cannot be read is reported as an
/// issue and skipped. Sources are sorted by path before building so the
/// arena does not depend on directory iteration order.
pub fn load_content_dir(dir: &Path) -> Result<(Repository, Vec<LoadIssue>), LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    let mut issues = Vec::new();
    collect_sources(dir, dir, &mut sources, &mut issues)?;
    sources.sort_by(|a, b| a.path.cmp(&b.path));

    Ok((build_repository(&sources), issues))
}

fn collect_sources(
    root: &Path,
    dir: &Path,
    sources: &mut Vec<SourceFile>,
    issues: &mut Vec<LoadIssue>,
) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LoadError::ReadError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                issues.push(LoadIssue {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        if path.is_dir() {
            // A subdirectory that fails to read drops its subtree, not the load
            if let Err(LoadError::ReadError { path, source }) =
                collect_sources(root, &path, sources, issues)
            {
                issues.push(LoadIssue {
                    path,
                    reason: source.to_string(),
                });
            }
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !CONTENT_EXTENSIONS.contains(&ext) {
            continue;
        }

        match fs::read_to_string(&path) {
            Ok(text) => {
                let rel = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .into_owned();
                sources.push(SourceFile { path: rel, text });
            }
            Err(e) => issues.push(LoadIssue {
                path: path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    Ok(())
}

/// Load a complete workspace from a content directory: desk.toml (defaults
/// when absent), the content tree, and a session with the configured start
/// path applied.
pub fn load_workspace(dir: &Path) -> Result<(Workspace, Vec<LoadIssue>), LoadError> {
    let config = config_io::read_config(dir)?;
    let (repo, issues) = load_content_dir(dir)?;
    Ok((Workspace::new(config, repo), issues))
}
