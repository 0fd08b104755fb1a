use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::model::PageId;

/// What to publish and where. Secrets (the Notion token) are not part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub output_dir: PathBuf,
    pub site_title: String,
    #[serde(default)]
    pub pages: Vec<PageId>,
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub stylesheet: Option<PathBuf>,
    #[serde(default)]
    pub notion: NotionSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionSettings {
    /// Overrides the public API endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl SiteConfig {
    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            site_title = %self.site_title,
            pages_count = self.pages.len(),
            "Loaded SiteConfig"
        );
        debug!(?self, "SiteConfig loaded (full debug)");
    }
}
