use alloy_primitives::Address;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::leaf;
use crate::{
    AirdropError, DistributionMode, MerkleHash, MerkleTree, OddNodeRule, Recipient, TokenAmount,
};

/// Everything besides the recipient list that determines the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub mode: DistributionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_amount: Option<TokenAmount>,
    #[serde(default)]
    pub odd_node_rule: OddNodeRule,
}

impl DistributionParams {
    pub fn new(mode: DistributionMode) -> DistributionParams {
        DistributionParams {
            mode,
            default_amount: None,
            odd_node_rule: OddNodeRule::default(),
        }
    }

    pub fn with_default_amount(mut self, default_amount: TokenAmount) -> DistributionParams {
        self.default_amount = Some(default_amount);
        self
    }

    pub fn with_odd_node_rule(mut self, odd_node_rule: OddNodeRule) -> DistributionParams {
        self.odd_node_rule = odd_node_rule;
        self
    }

    /// The amount `recipient` may claim, if known.
    pub fn entitlement(&self, recipient: &Recipient) -> Result<Option<TokenAmount>, AirdropError> {
        match self.mode {
            DistributionMode::Equal => Ok(self.default_amount),
            DistributionMode::Custom => leaf::recipient_amount(recipient).map(Some),
        }
    }
}

/// A merkle tree together with the recipients it was built from.
#[derive(Debug, Clone)]
pub struct AirdropMerkleTree {
    recipients: Vec<Recipient>,
    params: DistributionParams,
    tree: MerkleTree,
}

impl AirdropMerkleTree {
    pub fn build(
        recipients: &[Recipient],
        params: &DistributionParams,
    ) -> Result<AirdropMerkleTree, AirdropError> {
        if recipients.is_empty() {
            return Err(AirdropError::EmptyRecipientSet);
        }
        let leaves = recipients
            .iter()
            .map(|recipient| leaf::encode(recipient, params.mode, params.default_amount.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let tree = MerkleTree::build_with_rule(leaves, params.odd_node_rule)?;
        Ok(AirdropMerkleTree {
            recipients: recipients.to_vec(),
            params: *params,
            tree,
        })
    }

    pub fn root(&self) -> &MerkleHash {
        self.tree.root()
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn indexes_for_address(&self, address: &Address) -> Vec<usize> {
        self.recipients
            .iter()
            .enumerate()
            .filter(|(_, recipient)| recipient.address == *address)
            .map(|(position, _)| position)
            .collect()
    }

    pub fn proof_at_index(&self, index: usize) -> Result<Vec<MerkleHash>, AirdropError> {
        self.tree.proof_for(index)
    }

    /// Proof for the first occurrence of `address`, if it is a recipient.
    pub fn proof_for_address(&self, address: &Address) -> Option<Vec<MerkleHash>> {
        let index = self
            .recipients
            .iter()
            .position(|recipient| recipient.address == *address)?;
        self.tree.proof_for(index).ok()
    }
}

/// Result of [`build_tree`]: the root to publish and a proof per recipient address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropDistribution {
    pub root: MerkleHash,
    pub mode: DistributionMode,
    pub leaf_count: usize,
    pub proofs: IndexMap<Address, Vec<MerkleHash>>,
}

/// Builds the commitment for `recipients`.
///
/// Proofs are keyed by address in recipient order. A repeated address
/// keeps the proof of its first occurrence.
pub fn build_tree(
    recipients: &[Recipient],
    params: &DistributionParams,
) -> Result<AirdropDistribution, AirdropError> {
    let airdrop_merkle_tree = AirdropMerkleTree::build(recipients, params)?;

    let mut proofs = IndexMap::with_capacity(recipients.len());
    for (index, recipient) in recipients.iter().enumerate() {
        if proofs.contains_key(&recipient.address) {
            continue;
        }
        proofs.insert(recipient.address, airdrop_merkle_tree.proof_at_index(index)?);
    }

    info!(
        recipients = recipients.len(),
        mode = ?params.mode,
        root = %airdrop_merkle_tree.root(),
        "Built airdrop distribution"
    );

    Ok(AirdropDistribution {
        root: *airdrop_merkle_tree.root(),
        mode: params.mode,
        leaf_count: recipients.len(),
        proofs,
    })
}
