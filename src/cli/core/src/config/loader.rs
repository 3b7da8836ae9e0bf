/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::StudioConfig;

pub const CONFIG_FILE: &str = "studio.toml";

/// Walk upward from `start` to find `studio.toml`, like Cargo.toml discovery
pub fn find_studio_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn parse_studio_config(content: &str) -> Result<StudioConfig> {
  let config: StudioConfig = toml::from_str(content)?;
  config.validate()?;
  Ok(config)
}

pub fn load_studio_config(path: &Path) -> Result<StudioConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_studio_config(&content).with_context(|| format!("failed to parse {}", path.display()))
}
