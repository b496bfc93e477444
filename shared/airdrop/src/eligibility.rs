use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::leaf::{custom_leaf, equal_leaf, recipient_amount};
use crate::recipient::parse_address;
use crate::{
    AirdropError, AirdropMerkleTree, DistributionMode, DistributionParams, MerkleHash, Recipient,
    TokenAmount,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub eligible: bool,
    pub proof: Option<Vec<MerkleHash>>,
    pub leaf_index: Option<usize>,
    /// What the claim pays out, when known.
    pub amount: Option<TokenAmount>,
}

impl Eligibility {
    pub fn ineligible() -> Eligibility {
        Eligibility {
            eligible: false,
            proof: None,
            leaf_index: None,
            amount: None,
        }
    }
}

/// Checks whether `address` can claim from the distribution committed to by `expected_root`.
///
/// The tree is rebuilt from `recipients` on every call and the derived
/// proof is replayed against `expected_root` before anything is reported
/// as eligible. A stale root, a wrong claimed amount or an unknown address
/// all come back as `eligible: false`, not as errors.
///
/// `address` is matched case-insensitively, except that mixed-case input
/// must carry a valid EIP-55 checksum or it is rejected as
/// [`AirdropError::InvalidAddress`] (see [`parse_address`]). A malformed
/// amount inside `recipients` is an [`AirdropError::InvalidAmount`].
pub fn verify_eligibility(
    address: &str,
    claimed_amount: Option<&str>,
    recipients: &[Recipient],
    expected_root: &MerkleHash,
    params: &DistributionParams,
) -> Result<Eligibility, AirdropError> {
    let address = parse_address(address)?;
    verify_address_eligibility(&address, claimed_amount, recipients, expected_root, params)
}

pub fn verify_address_eligibility(
    address: &Address,
    claimed_amount: Option<&str>,
    recipients: &[Recipient],
    expected_root: &MerkleHash,
    params: &DistributionParams,
) -> Result<Eligibility, AirdropError> {
    let occurrences: Vec<usize> = recipients
        .iter()
        .enumerate()
        .filter(|(_, recipient)| recipient.address == *address)
        .map(|(position, _)| position)
        .collect();
    let Some(&first_occurrence) = occurrences.first() else {
        debug!(%address, "Address is not a recipient");
        return Ok(Eligibility::ineligible());
    };

    let (candidate_leaf, amount) = match params.mode {
        DistributionMode::Equal => (equal_leaf(address), params.default_amount),
        DistributionMode::Custom => {
            let amount = match claimed_amount {
                Some(text) => match TokenAmount::parse_decimal(text) {
                    Ok(amount) => amount,
                    Err(err) => {
                        debug!(%address, amount = text, "Claimed amount is malformed: {err}");
                        return Ok(Eligibility::ineligible());
                    }
                },
                None => recipient_amount(&recipients[first_occurrence])?,
            };
            (custom_leaf(address, &amount), Some(amount))
        }
    };

    let airdrop_merkle_tree = AirdropMerkleTree::build(recipients, params)?;
    let leaves = airdrop_merkle_tree.tree().leaves();
    let leaf_index = occurrences
        .iter()
        .copied()
        .find(|&position| leaves[position] == candidate_leaf)
        .unwrap_or(first_occurrence);
    let proof = airdrop_merkle_tree.proof_at_index(leaf_index)?;

    if !expected_root.is_valid_proof(&candidate_leaf, &proof) {
        debug!(
            %address,
            expected_root = %expected_root,
            rebuilt_root = %airdrop_merkle_tree.root(),
            "Proof does not replay to the expected root"
        );
        return Ok(Eligibility::ineligible());
    }

    Ok(Eligibility {
        eligible: true,
        proof: Some(proof),
        leaf_index: Some(leaf_index),
        amount,
    })
}
