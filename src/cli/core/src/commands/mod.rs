/* src/cli/core/src/commands/mod.rs */

pub mod browse;
pub mod upload;
pub mod users;

use std::sync::Arc;

use anyhow::Result;
use studio_client::{Backend, BackendConfig, StaticToken};
use tracing::debug;

use crate::config::StudioConfig;
use crate::ui;

/// Build the backend client from `[backend]`, reading the token from the environment.
pub fn connect(config: &StudioConfig) -> Result<Backend> {
  let section = &config.backend;
  let token = StaticToken::from_env(&section.token_env);
  if !token.is_set() {
    ui::warn(&format!("${} is not set, sending requests without a token", section.token_env));
  }
  debug!(url = %section.url, timeout_secs = section.timeout_secs, "connecting to backend");
  let backend_config = BackendConfig::new(section.url.trim()).timeout(section.timeout());
  Ok(Backend::new(backend_config, Arc::new(token))?)
}
