use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::AirdropError;

/// One airdrop beneficiary, as read from the recipient table.
///
/// `amount` is kept as the raw decimal text; it is only interpreted when
/// a leaf is encoded in custom distribution mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

impl Recipient {
    pub fn new(address: Address, amount: Option<String>) -> Recipient {
        Recipient { address, amount }
    }

    /// The amount text, if present and not blank.
    pub fn amount(&self) -> Option<&str> {
        self.amount
            .as_deref()
            .map(str::trim)
            .filter(|amount| !amount.is_empty())
    }
}

/// Parses a 20-byte hex address, with or without the `0x` (or `0X`) prefix.
///
/// Single-case input is accepted as-is. Mixed-case input must carry a
/// valid EIP-55 checksum.
pub fn parse_address(text: &str) -> Result<Address, AirdropError> {
    let invalid = || AirdropError::InvalidAddress(text.to_string());

    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let address = Address::from_str(digits).map_err(|_| invalid())?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(invalid());
    }
    Ok(address)
}
