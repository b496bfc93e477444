//! Merkle commitments for token airdrops.
//!
//! A recipient list is hashed into leaves, the leaves into a sorted-pair
//! merkle tree, and the tree root is what a distributor contract stores.
//! Every proof produced here replays with the same sorted-pair rule the
//! contract uses, so the contract never needs the list itself.

mod amount;
mod claim;
mod distribution;
mod eligibility;
mod error;
mod ingest;
pub mod leaf;
mod merkle_hash;
mod merkle_tree;
mod mode;
mod recipient;

pub use alloy_primitives::Address;

pub use amount::{AmountError, TOKEN_DECIMALS, TokenAmount};
pub use claim::{ClaimError, ClaimPlan, DistributorContract, prepare_claim, submit_claim};
pub use distribution::{AirdropDistribution, AirdropMerkleTree, DistributionParams, build_tree};
pub use eligibility::{Eligibility, verify_address_eligibility, verify_eligibility};
pub use error::AirdropError;
pub use ingest::{IngestOptions, IngestReport, SkippedRow, parse_recipients, read_recipients};
pub use merkle_hash::MerkleHash;
pub use merkle_tree::{MerkleTree, OddNodeRule};
pub use mode::DistributionMode;
pub use recipient::{Recipient, parse_address};
