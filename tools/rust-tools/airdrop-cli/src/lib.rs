// Library exports for airdrop-cli
use anyhow::{Context, Result};
use std::path::Path;

pub mod bundle;
pub mod commands;
pub mod config;
pub mod logging;

pub use bundle::DistributionBundle;
pub use config::{AirdropConfig, ModeSelection};

/// Load environment variables from a file into host process
/// (lets flags like `--config` come from a deployment's .env)
pub fn load_and_apply_env_file(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file: {}", path.display()))?;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            std::env::set_var(key.trim().trim_matches('"'), value.trim().trim_matches('"'));
        }
    }
    Ok(())
}
