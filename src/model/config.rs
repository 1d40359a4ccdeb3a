use serde::{Deserialize, Serialize};

/// Configuration from desk.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub site: SiteInfo,
    #[serde(default)]
    pub start: StartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Display name for the desk
    #[serde(default = "default_site_name")]
    pub name: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            name: default_site_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConfig {
    /// File opened (and revealed in the explorer) when the workspace is
    /// constructed, as a path relative to the content root.
    #[serde(default)]
    pub open: Option<String>,
    /// How many entries the dashboard feed shows
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for StartConfig {
    fn default() -> Self {
        StartConfig {
            open: None,
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_site_name() -> String {
    "DEV.OS".to_string()
}

fn default_recent_limit() -> usize {
    8
}
