use anyhow::{Context, Result};
use clap::ValueEnum;
use launchpad_airdrop::{
    DistributionMode, DistributionParams, IngestOptions, OddNodeRule, Recipient, TokenAmount,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    /// Custom if any row carries an amount, equal otherwise
    #[default]
    Auto,
    Equal,
    Custom,
}

/// Distribution defaults read from a TOML file.
///
/// ```toml
/// mode = "custom"
/// odd_node_rule = "promote"
/// reject_duplicates = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AirdropConfig {
    pub mode: ModeSelection,
    pub default_amount: Option<TokenAmount>,
    pub odd_node_rule: OddNodeRule,
    pub reject_duplicates: bool,
}

impl AirdropConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            reject_duplicates: self.reject_duplicates,
        }
    }

    pub fn distribution_params(&self, recipients: &[Recipient]) -> DistributionParams {
        let mode = match self.mode {
            ModeSelection::Auto => DistributionMode::detect(recipients),
            ModeSelection::Equal => DistributionMode::Equal,
            ModeSelection::Custom => DistributionMode::Custom,
        };
        let params = DistributionParams::new(mode).with_odd_node_rule(self.odd_node_rule);
        match self.default_amount {
            Some(default_amount) => params.with_default_amount(default_amount),
            None => params,
        }
    }
}
