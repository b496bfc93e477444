use anyhow::{Context, Result};
use indexmap::IndexMap;
use launchpad_airdrop::{
    Address, AirdropDistribution, DistributionParams, Eligibility, MerkleHash, Recipient,
    SkippedRow, verify_eligibility,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Everything needed to publish a distribution and answer claims against it later.
///
/// The recipient list and parameters are stored next to the root so that
/// eligibility can always be recomputed instead of trusting `proofs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBundle {
    pub root: MerkleHash,
    pub params: DistributionParams,
    pub leaf_count: usize,
    pub recipients: Vec<Recipient>,
    pub proofs: IndexMap<Address, Vec<MerkleHash>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRow>,
}

impl DistributionBundle {
    pub fn new(
        distribution: AirdropDistribution,
        params: DistributionParams,
        recipients: Vec<Recipient>,
        skipped: Vec<SkippedRow>,
    ) -> Self {
        Self {
            root: distribution.root,
            params,
            leaf_count: distribution.leaf_count,
            recipients,
            proofs: distribution.proofs,
            skipped,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse bundle: {}", path.display()))
    }

    /// Writes the bundle next to `path` first and renames it into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write bundle: {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move bundle into place: {}", path.display()))?;
        info!(path = %path.display(), root = %self.root, "Saved distribution bundle");
        Ok(())
    }

    /// Checks `address` against `root`, or against the bundle's own root when none is given.
    pub fn verify(
        &self,
        address: &str,
        claimed_amount: Option<&str>,
        root: Option<&MerkleHash>,
    ) -> Result<Eligibility> {
        let root = root.unwrap_or(&self.root);
        Ok(verify_eligibility(
            address,
            claimed_amount,
            &self.recipients,
            root,
            &self.params,
        )?)
    }
}
