/* src/cli/core/src/config/types.rs */

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use studio_core::check_page_size;

#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
  pub backend: BackendSection,
  #[serde(default)]
  pub workspace: WorkspaceSection,
  #[serde(default)]
  pub gallery: GallerySection,
  #[serde(default)]
  pub assets: AssetsSection,
  #[serde(default)]
  pub users: UsersSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSection {
  pub url: String,
  #[serde(default = "default_token_env")]
  pub token_env: String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl BackendSection {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

fn default_token_env() -> String {
  "STUDIO_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceSection {
  pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GallerySection {
  #[serde(default = "default_gallery_page_size")]
  pub page_size: u32,
}

impl Default for GallerySection {
  fn default() -> Self {
    Self { page_size: default_gallery_page_size() }
  }
}

fn default_gallery_page_size() -> u32 {
  12
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsSection {
  #[serde(default = "default_assets_page_size")]
  pub page_size: u32,
}

impl Default for AssetsSection {
  fn default() -> Self {
    Self { page_size: default_assets_page_size() }
  }
}

fn default_assets_page_size() -> u32 {
  20
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersSection {
  #[serde(default = "default_users_page_size")]
  pub page_size: u32,
  #[serde(default = "default_debounce_ms")]
  pub debounce_ms: u64,
}

impl UsersSection {
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }
}

impl Default for UsersSection {
  fn default() -> Self {
    Self { page_size: default_users_page_size(), debounce_ms: default_debounce_ms() }
  }
}

fn default_users_page_size() -> u32 {
  25
}

fn default_debounce_ms() -> u64 {
  400
}

impl StudioConfig {
  pub fn validate(&self) -> Result<()> {
    let url = self.backend.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
      bail!("backend.url must start with http:// or https:// (got \"{url}\")");
    }
    if self.backend.timeout_secs == 0 {
      bail!("backend.timeout_secs must be greater than 0");
    }
    if self.backend.token_env.trim().is_empty() {
      bail!("backend.token_env must not be empty");
    }
    check_page_size(self.gallery.page_size).context("invalid gallery.page_size")?;
    check_page_size(self.assets.page_size).context("invalid assets.page_size")?;
    check_page_size(self.users.page_size).context("invalid users.page_size")?;
    if let Some(id) = &self.workspace.id
      && id.trim().is_empty()
    {
      bail!("workspace.id must not be empty when set");
    }
    Ok(())
  }

  /// Explicit `--workspace` wins over the configured default.
  pub fn workspace_id(&self, explicit: Option<String>) -> Option<String> {
    explicit.or_else(|| self.workspace.id.clone())
  }
}
