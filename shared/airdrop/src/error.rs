use alloy_primitives::Address;
use thiserror::Error;

use crate::amount::AmountError;

#[derive(Error, Debug)]
pub enum AirdropError {
    #[error("no valid recipients in input")]
    EmptyRecipientSet,

    #[error("cannot build a merkle tree from zero leaves")]
    EmptyLeafSet,

    #[error("recipient {address} has no amount, required in custom distribution mode")]
    MissingAmount { address: Address },

    #[error("recipient {address} has invalid amount {amount:?}: {source}")]
    InvalidAmount {
        address: Address,
        amount: String,
        #[source]
        source: AmountError,
    },

    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("leaf index {index} out of range for tree with {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("recipient table has no \"address\" column")]
    MissingAddressColumn,

    #[error("address {0} appears more than once")]
    DuplicateAddress(Address),

    #[error("invalid merkle hash {0:?}")]
    InvalidMerkleHash(String),

    #[error("failed to read recipient table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to open recipient table: {0}")]
    Io(#[from] std::io::Error),
}
