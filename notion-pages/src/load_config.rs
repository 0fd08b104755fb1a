/// `load_config` module: Loads a static YAML site config and injects the Notion token from the environment.
///
/// This module is the only place where untrusted YAML is parsed and mapped to the
/// strongly-typed [`SiteConfig`] of `notion-pages-core`.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file into [`SiteConfig`]
/// - Inject secrets (the `NOTION_TOKEN` integration token) from the environment; they never live in YAML
/// - Read the optional stylesheet so the CLI can hand it to the page assembler
/// - Produce clear diagnostics: any failure in loading results in a readable `anyhow::Error`
///
/// # Example
/// ```yaml
/// output_dir: ./site
/// site_title: My Notes
/// pages:
///   - 0f3c1e2a9d6b4c8e8d7a5b4c3d2e1f00
/// templates_dir: ./templates   # optional
/// stylesheet: ./style.css      # optional
/// notion:
///   base_url: https://api.notion.com/v1   # optional
/// ```
use anyhow::Result;
use notion_pages_core::config::SiteConfig;
use notion_pages_core::notion::TOKEN_ENV;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug)]
pub struct CliConfig {
    pub site: SiteConfig,
    pub notion_token: String,
}

/// Loads a static YAML config file (no secrets) and injects `NOTION_TOKEN` from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let site: SiteConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };
    site.trace_loaded();

    if site.pages.is_empty() {
        warn!(config_path = ?path_ref, "Config lists no pages; only the index will be published");
    }

    let notion_token = match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => token,
        _ => {
            error!(env = TOKEN_ENV, "Notion token missing in environment");
            return Err(anyhow::anyhow!(
                "Missing required environment variable {TOKEN_ENV}"
            ));
        }
    };

    Ok(CliConfig { site, notion_token })
}

/// Reads the configured stylesheet, if any.
pub fn load_stylesheet(site: &SiteConfig) -> Result<Option<String>> {
    let Some(path) = &site.stylesheet else {
        return Ok(None);
    };
    fs::read_to_string(path).map(Some).map_err(|e| {
        error!(error = ?e, stylesheet = ?path, "Failed to read stylesheet");
        anyhow::anyhow!("Failed to read stylesheet {:?}: {}", path, e)
    })
}
