//! Session state transitions.
//!
//! Every operation is total over well-formed input: an unknown id or a
//! wrong-kind target is a no-op, never a panic or an error. These are
//! interactive-state transitions, and a stale reference (a click racing a
//! reload) must not kill the session. Each op returns whether state changed
//! so callers can skip recomputing projections.

use crate::model::node::NodeKind;
use crate::model::repository::Repository;
use crate::model::session::Session;

/// Flip a folder's expand/collapse flag. No-op on unknown ids and files.
pub fn toggle_folder(repo: &mut Repository, folder_id: &str) -> bool {
    match repo.get_mut(folder_id) {
        Some(node) if node.kind == NodeKind::Folder => {
            node.is_expanded = !node.is_expanded;
            true
        }
        _ => false,
    }
}

/// Expand every ancestor folder of a node so it is visible in the explorer.
pub fn reveal(repo: &mut Repository, id: &str) -> bool {
    let Some(node) = repo.get(id) else {
        return false;
    };
    let mut parent = node.parent_id.clone();
    let mut changed = false;
    while let Some(pid) = parent {
        match repo.get_mut(&pid) {
            Some(folder) => {
                if !folder.is_expanded {
                    folder.is_expanded = true;
                    changed = true;
                }
                parent = folder.parent_id.clone();
            }
            None => break,
        }
    }
    changed
}

/// Open a file: pin it in the tab strip (at the end, if not already open)
/// and make it active. Reopening an already-open file never reorders its
/// tab. No-op if the id does not resolve to a file.
pub fn open_file(repo: &Repository, session: &mut Session, file_id: &str) -> bool {
    match repo.get(file_id) {
        Some(node) if node.kind == NodeKind::File => {}
        _ => return false,
    }

    let mut changed = false;
    if !session.is_open(file_id) {
        session.open_tabs.push(file_id.to_string());
        changed = true;
    }
    if session.active_id.as_deref() != Some(file_id) {
        session.active_id = Some(file_id.to_string());
        changed = true;
    }
    changed
}

/// Make an already-open tab active. No-op if the id is not an open tab.
pub fn activate_tab(session: &mut Session, file_id: &str) -> bool {
    if !session.is_open(file_id) {
        return false;
    }
    if session.active_id.as_deref() == Some(file_id) {
        return false;
    }
    session.active_id = Some(file_id.to_string());
    true
}

/// Close a tab. Closing a background tab never disturbs focus; closing the
/// active tab moves focus to the tab now at the same index (the successor),
/// falling back to the new last tab, or to the dashboard when none remain.
pub fn close_tab(session: &mut Session, file_id: &str) -> bool {
    let Some(idx) = session.open_tabs.iter().position(|t| t == file_id) else {
        return false;
    };
    session.open_tabs.remove(idx);

    if session.active_id.as_deref() == Some(file_id) {
        session.active_id = session
            .open_tabs
            .get(idx)
            .or_else(|| session.open_tabs.last())
            .cloned();
    }
    true
}

/// Return to the dashboard: clears the active file and the tag filter but
/// leaves the tab strip alone for a quick return.
pub fn navigate_home(session: &mut Session) -> bool {
    let changed = session.active_id.is_some() || session.tag_filter.is_some();
    session.active_id = None;
    session.tag_filter = None;
    changed
}

/// Replace the active tag filter. Toggle-off-on-second-click semantics
/// belong to the caller, not here.
pub fn set_tag_filter(session: &mut Session, tag: Option<&str>) -> bool {
    let next = tag.map(|t| t.to_string());
    if session.tag_filter == next {
        return false;
    }
    session.tag_filter = next;
    true
}
