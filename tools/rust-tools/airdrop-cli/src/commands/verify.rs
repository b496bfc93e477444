use crate::commands::Command;
use crate::DistributionBundle;
use anyhow::Result;
use clap::Args;
use launchpad_airdrop::MerkleHash;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Args)]
#[command()]
pub struct CommandVerify {
    #[clap(short, long, env = "AIRDROP_BUNDLE")]
    pub bundle: PathBuf,
    #[clap(long, alias = "wallet", value_name = "ADDRESS")]
    pub address: String,
    /// Amount being claimed, for custom distributions
    #[clap(long)]
    pub amount: Option<String>,
    /// Root published on-chain; defaults to the bundle's root
    #[clap(long, env = "AIRDROP_ROOT")]
    pub root: Option<MerkleHash>,
}

impl Command for CommandVerify {
    fn execute(self, out: &mut dyn Write) -> Result<()> {
        let Self {
            bundle,
            address,
            amount,
            root,
        } = self;

        let bundle = DistributionBundle::load(&bundle)?;
        let eligibility = bundle.verify(&address, amount.as_deref(), root.as_ref())?;
        info!(%address, eligible = eligibility.eligible, "Checked eligibility");

        serde_json::to_writer_pretty(&mut *out, &eligibility)?;
        writeln!(out)?;
        Ok(())
    }
}
