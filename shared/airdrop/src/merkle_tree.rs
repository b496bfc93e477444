use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AirdropError, MerkleHash};

/// What happens to the last node of a layer with an odd number of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddNodeRule {
    /// Carried up unchanged; its proof gets no element for that layer.
    #[default]
    Promote,
    /// Paired with itself; its proof repeats the node for that layer.
    Duplicate,
}

impl FromStr for OddNodeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "promote" => Ok(OddNodeRule::Promote),
            "duplicate" => Ok(OddNodeRule::Duplicate),
            other => Err(format!("unknown odd node rule {other:?}, expected promote or duplicate")),
        }
    }
}

/// Binary merkle tree over an ordered list of leaves, combined with the sorted-pair rule.
///
/// Layer 0 holds the leaves in input order, the last layer holds the root alone.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    merkle_layers: Vec<Vec<MerkleHash>>,
    merkle_root: MerkleHash,
    odd_node_rule: OddNodeRule,
}

impl MerkleTree {
    pub fn build(leaves: Vec<MerkleHash>) -> Result<MerkleTree, AirdropError> {
        MerkleTree::build_with_rule(leaves, OddNodeRule::default())
    }

    pub fn build_with_rule(
        leaves: Vec<MerkleHash>,
        odd_node_rule: OddNodeRule,
    ) -> Result<MerkleTree, AirdropError> {
        let Some(&first_leaf) = leaves.first() else {
            return Err(AirdropError::EmptyLeafSet);
        };
        let mut merkle_root = first_leaf;
        let mut merkle_layer = leaves;
        let mut merkle_layers = vec![];
        while merkle_layer.len() > 1 {
            let mut merkle_parents = Vec::with_capacity(merkle_layer.len().div_ceil(2));
            for pair in merkle_layer.chunks(2) {
                let left = &pair[0];
                merkle_parents.push(match (pair.get(1), odd_node_rule) {
                    (Some(right), _) => MerkleHash::from_pair(left, right),
                    (None, OddNodeRule::Promote) => *left,
                    (None, OddNodeRule::Duplicate) => MerkleHash::from_pair(left, left),
                });
            }
            merkle_root = merkle_parents[0];
            merkle_layers.push(merkle_layer);
            merkle_layer = merkle_parents;
        }
        merkle_layers.push(merkle_layer);

        debug!(
            leaves = merkle_layers[0].len(),
            height = merkle_layers.len() - 1,
            root = %merkle_root,
            "Built merkle tree"
        );

        Ok(MerkleTree {
            merkle_layers,
            merkle_root,
            odd_node_rule,
        })
    }

    pub fn root(&self) -> &MerkleHash {
        &self.merkle_root
    }

    pub fn leaves(&self) -> &[MerkleHash] {
        &self.merkle_layers[0]
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Always false: an empty tree cannot be built.
    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Number of layers above the leaves; 0 for a single-leaf tree.
    pub fn height(&self) -> usize {
        self.merkle_layers.len() - 1
    }

    pub fn layers(&self) -> &[Vec<MerkleHash>] {
        &self.merkle_layers
    }

    pub fn odd_node_rule(&self) -> OddNodeRule {
        self.odd_node_rule
    }

    /// Positions of every leaf equal to `leaf`, in order.
    pub fn leaf_indexes_for(&self, leaf: &MerkleHash) -> Vec<usize> {
        self.leaves()
            .iter()
            .enumerate()
            .filter(|(_, candidate)| *candidate == leaf)
            .map(|(position, _)| position)
            .collect()
    }

    /// Sibling hashes from the leaf at `leaf_index` up to the root, leaf side first.
    pub fn proof_for(&self, leaf_index: usize) -> Result<Vec<MerkleHash>, AirdropError> {
        if leaf_index >= self.len() {
            return Err(AirdropError::IndexOutOfRange {
                index: leaf_index,
                len: self.len(),
            });
        }
        let mut index = leaf_index;
        let mut proof = vec![];
        for layer in &self.merkle_layers {
            if layer.len() == 1 {
                break;
            }
            let sibling_index = if index % 2 == 0 { index + 1 } else { index - 1 };
            match (layer.get(sibling_index), self.odd_node_rule) {
                (Some(sibling), _) => proof.push(*sibling),
                (None, OddNodeRule::Promote) => {}
                (None, OddNodeRule::Duplicate) => proof.push(layer[index]),
            }
            index /= 2;
        }
        Ok(proof)
    }
}
