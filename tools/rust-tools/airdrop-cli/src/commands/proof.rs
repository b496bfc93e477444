use crate::commands::Command;
use crate::DistributionBundle;
use anyhow::{Result, bail};
use clap::Args;
use launchpad_airdrop::parse_address;
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// Prints the published proof for an address, once it replays to the bundle root
#[derive(Debug, Clone, Args)]
#[command()]
pub struct CommandProof {
    #[clap(short, long, env = "AIRDROP_BUNDLE")]
    pub bundle: PathBuf,
    #[clap(long, alias = "wallet", value_name = "ADDRESS")]
    pub address: String,
}

impl Command for CommandProof {
    fn execute(self, out: &mut dyn Write) -> Result<()> {
        let bundle = DistributionBundle::load(&self.bundle)?;
        let address = parse_address(&self.address)?;
        let Some(proof) = bundle.proofs.get(&address) else {
            bail!("{address} is not part of the distribution with root {}", bundle.root);
        };
        let eligibility = bundle.verify(&self.address, None, None)?;
        if !eligibility.eligible || eligibility.proof.as_ref() != Some(proof) {
            bail!(
                "Stored proof for {address} does not replay to the bundle root {}",
                bundle.root
            );
        }

        serde_json::to_writer_pretty(
            &mut *out,
            &json!({
                "address": address,
                "root": bundle.root,
                "proof": proof,
            }),
        )?;
        writeln!(out)?;
        Ok(())
    }
}
