use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::bail;
use async_trait::async_trait;
use launchpad_airdrop::leaf::{custom_leaf, equal_leaf};
use launchpad_airdrop::{Address, DistributionMode, DistributorContract, MerkleHash, TokenAmount};

/// Distributor contract kept in memory, checking claims the way the deployed one does.
pub struct MemoryDistributor {
    merkle_root: MerkleHash,
    mode: DistributionMode,
    start_time: u32,
    claimed: Mutex<HashSet<Address>>,
}

impl MemoryDistributor {
    pub fn new(merkle_root: MerkleHash, mode: DistributionMode, start_time: u32) -> Self {
        Self {
            merkle_root,
            mode,
            start_time,
            claimed: Mutex::new(HashSet::new()),
        }
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.lock().unwrap().len()
    }
}

#[async_trait]
impl DistributorContract for MemoryDistributor {
    async fn merkle_root(&self) -> anyhow::Result<MerkleHash> {
        Ok(self.merkle_root)
    }

    async fn has_claimed(&self, claimer: &Address) -> anyhow::Result<bool> {
        Ok(self.claimed.lock().unwrap().contains(claimer))
    }

    async fn start_time(&self) -> anyhow::Result<u32> {
        Ok(self.start_time)
    }

    async fn claim(
        &self,
        claimer: &Address,
        amount: Option<TokenAmount>,
        proof: &[MerkleHash],
    ) -> anyhow::Result<()> {
        let leaf = match (self.mode, amount) {
            (DistributionMode::Equal, _) => equal_leaf(claimer),
            (DistributionMode::Custom, Some(amount)) => custom_leaf(claimer, &amount),
            (DistributionMode::Custom, None) => bail!("missing claim amount"),
        };
        if !self.merkle_root.is_valid_proof(&leaf, proof) {
            bail!("invalid merkle proof");
        }
        if !self.claimed.lock().unwrap().insert(*claimer) {
            bail!("already claimed");
        }
        Ok(())
    }
}
