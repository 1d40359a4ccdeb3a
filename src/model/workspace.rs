use super::config::DeskConfig;
use super::repository::{Repository, normalize_path};
use super::session::Session;

/// A fully loaded desk: config, content tree, and session state.
///
/// There is deliberately no global instance. The workspace is constructed
/// explicitly and passed to whoever needs it, so every state transition is
/// testable without a rendering environment.
#[derive(Debug)]
pub struct Workspace {
    pub config: DeskConfig,
    pub repo: Repository,
    pub session: Session,
}

impl Workspace {
    /// Build a workspace with an empty session, then apply the configured
    /// start path through the ordinary navigation ops. An unknown start path
    /// is ignored, like any other stale reference.
    pub fn new(config: DeskConfig, repo: Repository) -> Self {
        let mut ws = Workspace {
            config,
            repo,
            session: Session::new(),
        };
        if let Some(path) = ws.config.start.open.clone() {
            let id = normalize_path(&path);
            crate::ops::nav::open_file(&ws.repo, &mut ws.session, &id);
            crate::ops::nav::reveal(&mut ws.repo, &id);
        }
        ws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::loader::{SourceFile, build_repository};
    use crate::model::config::StartConfig;

    fn sample_repo() -> Repository {
        build_repository(&[
            SourceFile {
                path: "welcome.md".to_string(),
                text: "# Welcome\n".to_string(),
            },
            SourceFile {
                path: "posts/rust/intro.md".to_string(),
                text: "# Intro\n".to_string(),
            },
        ])
    }

    #[test]
    fn test_new_without_start_path() {
        let ws = Workspace::new(DeskConfig::default(), sample_repo());
        assert!(ws.session.open_tabs.is_empty());
        assert_eq!(ws.session.active_id, None);
    }

    #[test]
    fn test_new_opens_and_reveals_start_path() {
        let config = DeskConfig {
            start: StartConfig {
                open: Some("posts/rust/intro.md".to_string()),
                ..StartConfig::default()
            },
            ..DeskConfig::default()
        };
        let ws = Workspace::new(config, sample_repo());
        assert_eq!(ws.session.open_tabs, vec!["posts/rust/intro.md"]);
        assert_eq!(ws.session.active_id.as_deref(), Some("posts/rust/intro.md"));
        assert!(ws.repo.get("posts").unwrap().is_expanded);
        assert!(ws.repo.get("posts/rust").unwrap().is_expanded);
    }

    #[test]
    fn test_new_with_unknown_start_path_is_a_noop() {
        let config = DeskConfig {
            start: StartConfig {
                open: Some("missing.md".to_string()),
                ..StartConfig::default()
            },
            ..DeskConfig::default()
        };
        let ws = Workspace::new(config, sample_repo());
        assert!(ws.session.open_tabs.is_empty());
        assert_eq!(ws.session.active_id, None);
    }
}
