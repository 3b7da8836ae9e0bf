/* src/cli/core/src/logging.rs */

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "STUDIO_LOG";

fn filter(verbose: bool) -> EnvFilter {
  if verbose {
    return EnvFilter::new("debug");
  }
  EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr so command output on stdout stays clean.
pub fn init(verbose: bool) {
  fmt().with_env_filter(filter(verbose)).with_writer(std::io::stderr).with_target(false).init();
}
