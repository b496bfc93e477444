use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fractional decimal digits of the distributed token.
pub const TOKEN_DECIMALS: usize = 18;

const SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid character {0:?} in amount")]
    InvalidCharacter(char),
    #[error("amount has more than {TOKEN_DECIMALS} fractional digits")]
    TooManyDecimals,
    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// A token amount in base units, i.e. scaled by 10^18.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(U256::ZERO);

    pub fn from_base_units(base_units: U256) -> TokenAmount {
        TokenAmount(base_units)
    }

    pub fn base_units(&self) -> U256 {
        self.0
    }

    pub fn checked_add(&self, other: &TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(TokenAmount)
    }

    /// Parses a plain decimal string such as `100`, `100.5` or `.25`.
    ///
    /// The fractional part is right-padded to 18 digits, never rounded;
    /// trailing zeros beyond the 18th digit are tolerated.
    pub fn parse_decimal(text: &str) -> Result<TokenAmount, AmountError> {
        let text = text.trim();
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(AmountError::Empty);
        }
        if let Some(c) = whole
            .chars()
            .chain(fraction.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(AmountError::InvalidCharacter(c));
        }
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > TOKEN_DECIMALS {
            return Err(AmountError::TooManyDecimals);
        }

        let mut digits = String::with_capacity(whole.len() + TOKEN_DECIMALS);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(TOKEN_DECIMALS - fraction.len()));

        U256::from_str_radix(&digits, 10)
            .map(TokenAmount)
            .map_err(|_| AmountError::Overflow)
    }

    /// The 32-byte big-endian word hashed into custom-mode leaves.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        // below 10^18, so it lives entirely in the lowest limb
        let fraction = (self.0 % SCALE).as_limbs()[0];
        if fraction == 0 {
            return write!(f, "{whole}");
        }
        let fraction = format!("{fraction:018}");
        write!(f, "{whole}.{}", fraction.trim_end_matches('0'))
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        TokenAmount::parse_decimal(text)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        TokenAmount::parse_decimal(&text).map_err(serde::de::Error::custom)
    }
}
