use crate::commands::Command;
use crate::config::{AirdropConfig, ModeSelection};
use crate::DistributionBundle;
use anyhow::{Context, Result};
use clap::Args;
use launchpad_airdrop::{build_tree, read_recipients, OddNodeRule, TokenAmount};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Args)]
#[command()]
pub struct CommandBuildTree {
    /// CSV with an `address` column and an optional `amount` column
    #[clap(short, long, env = "AIRDROP_INPUT")]
    pub input: PathBuf,
    /// Where to write the distribution bundle
    #[clap(short, long, env = "AIRDROP_BUNDLE")]
    pub output: PathBuf,
    /// TOML file with distribution defaults; flags take precedence
    #[clap(long, env = "AIRDROP_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(long, value_enum)]
    pub mode: Option<ModeSelection>,
    /// Amount each recipient receives in equal mode
    #[clap(long)]
    pub default_amount: Option<TokenAmount>,
    /// How to treat the last node of an odd-sized layer: promote or duplicate
    #[clap(long)]
    pub odd_node_rule: Option<OddNodeRule>,
    /// Fail instead of warning when an address is listed twice
    #[clap(long)]
    pub reject_duplicates: bool,
}

impl CommandBuildTree {
    fn resolve_config(&self) -> Result<AirdropConfig> {
        let mut config = AirdropConfig::load_or_default(self.config.as_deref())?;
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(default_amount) = self.default_amount {
            config.default_amount = Some(default_amount);
        }
        if let Some(odd_node_rule) = self.odd_node_rule {
            config.odd_node_rule = odd_node_rule;
        }
        config.reject_duplicates |= self.reject_duplicates;
        Ok(config)
    }
}

impl Command for CommandBuildTree {
    fn execute(self, out: &mut dyn Write) -> Result<()> {
        let config = self.resolve_config()?;

        let report = read_recipients(&self.input, &config.ingest_options())
            .with_context(|| format!("Failed to ingest {}", self.input.display()))?;
        let params = config.distribution_params(&report.recipients);
        if config.mode == ModeSelection::Auto {
            info!(mode = ?params.mode, "Detected distribution mode");
        }
        if !report.duplicates.is_empty() {
            warn!(
                duplicates = report.duplicates.len(),
                "Duplicate addresses kept; only the first occurrence gets a published proof"
            );
        }

        let distribution = build_tree(&report.recipients, &params)?;
        let bundle =
            DistributionBundle::new(distribution, params, report.recipients, report.skipped);
        bundle.save(&self.output)?;

        serde_json::to_writer_pretty(
            &mut *out,
            &json!({
                "root": bundle.root,
                "mode": bundle.params.mode,
                "odd_node_rule": bundle.params.odd_node_rule,
                "leaf_count": bundle.leaf_count,
                "skipped_rows": bundle.skipped.len(),
                "duplicates": report.duplicates,
                "bundle": self.output,
            }),
        )?;
        writeln!(out)?;
        Ok(())
    }
}
