/// Mutable navigation state for one running session.
///
/// Created empty when the workspace is constructed, mutated only through the
/// operations in `ops::nav`, and never persisted; a reload reconstructs it
/// from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// File ids pinned in the tab strip, in open order, no duplicates
    pub open_tabs: Vec<String>,
    /// File shown in the editor pane; `None` means the dashboard/home view
    pub active_id: Option<String>,
    /// Single active tag filter, or none
    pub tag_filter: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open_tabs.iter().any(|t| t == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }
}
