use alloy_primitives::Address;

use crate::{AirdropError, DistributionMode, MerkleHash, Recipient, TokenAmount};

/// Leaf for an equal-distribution recipient: `keccak256(address)`.
pub fn equal_leaf(address: &Address) -> MerkleHash {
    MerkleHash::from_parts(&[address.as_slice()])
}

/// Leaf for a custom-distribution recipient: `keccak256(address ++ uint256_be(amount))`,
/// the same bytes as `abi.encodePacked(address, uint256)`.
pub fn custom_leaf(address: &Address, amount: &TokenAmount) -> MerkleHash {
    MerkleHash::from_parts(&[address.as_slice(), &amount.to_be_bytes()])
}

/// Parses the recipient's amount text, as required by custom mode.
pub fn recipient_amount(recipient: &Recipient) -> Result<TokenAmount, AirdropError> {
    let text = recipient.amount().ok_or(AirdropError::MissingAmount {
        address: recipient.address,
    })?;
    TokenAmount::parse_decimal(text).map_err(|source| AirdropError::InvalidAmount {
        address: recipient.address,
        amount: text.to_string(),
        source,
    })
}

/// Encodes one recipient into its leaf.
///
/// `default_amount` never enters the hash; it is accepted so equal and
/// custom distributions share one call shape.
pub fn encode(
    recipient: &Recipient,
    mode: DistributionMode,
    _default_amount: Option<&TokenAmount>,
) -> Result<MerkleHash, AirdropError> {
    match mode {
        DistributionMode::Equal => Ok(equal_leaf(&recipient.address)),
        DistributionMode::Custom => Ok(custom_leaf(
            &recipient.address,
            &recipient_amount(recipient)?,
        )),
    }
}
