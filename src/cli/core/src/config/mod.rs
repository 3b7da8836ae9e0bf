/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{find_studio_config, load_studio_config};
pub use types::StudioConfig;
