use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    AirdropError, DistributionParams, MerkleHash, Recipient, TokenAmount,
    verify_address_eligibility,
};

/// The deployed distributor contract, as seen by a claimer.
///
/// The contract recomputes the leaf from the sender (and the amount in
/// custom mode) and checks the proof against its stored root with the
/// same sorted-pair rule as [`MerkleHash::is_valid_proof`].
#[async_trait]
pub trait DistributorContract {
    async fn merkle_root(&self) -> anyhow::Result<MerkleHash>;
    async fn has_claimed(&self, claimer: &Address) -> anyhow::Result<bool>;
    async fn start_time(&self) -> anyhow::Result<u32>;
    async fn claim(
        &self,
        claimer: &Address,
        amount: Option<TokenAmount>,
        proof: &[MerkleHash],
    ) -> anyhow::Result<()>;
}

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error(transparent)]
    Airdrop(#[from] AirdropError),

    #[error("distributor contract call failed: {0:#}")]
    Contract(anyhow::Error),

    #[error("claim is not ready: {0:?}")]
    NotReady(ClaimPlan),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimPlan {
    NotStarted {
        start_time: u32,
    },
    AlreadyClaimed,
    NotEligible,
    Ready {
        proof: Vec<MerkleHash>,
        amount: Option<TokenAmount>,
    },
}

/// Works out whether `claimer` can claim right now and with which proof.
///
/// The claim window and claim status are checked before eligibility, and
/// eligibility is checked against the root the contract actually holds.
pub async fn prepare_claim<C: DistributorContract + ?Sized>(
    contract: &C,
    claimer: &Address,
    claimed_amount: Option<&str>,
    recipients: &[Recipient],
    params: &DistributionParams,
    now_unix_timestamp: i64,
) -> Result<ClaimPlan, ClaimError> {
    let start_time = contract.start_time().await.map_err(ClaimError::Contract)?;
    if now_unix_timestamp < i64::from(start_time) {
        return Ok(ClaimPlan::NotStarted { start_time });
    }
    if contract
        .has_claimed(claimer)
        .await
        .map_err(ClaimError::Contract)?
    {
        return Ok(ClaimPlan::AlreadyClaimed);
    }
    let merkle_root = contract.merkle_root().await.map_err(ClaimError::Contract)?;
    let eligibility =
        verify_address_eligibility(claimer, claimed_amount, recipients, &merkle_root, params)?;
    match eligibility.proof {
        Some(proof) if eligibility.eligible => Ok(ClaimPlan::Ready {
            proof,
            amount: eligibility.amount,
        }),
        _ => Ok(ClaimPlan::NotEligible),
    }
}

/// Submits a [`ClaimPlan::Ready`] plan; any other plan is refused without touching the contract.
pub async fn submit_claim<C: DistributorContract + ?Sized>(
    contract: &C,
    claimer: &Address,
    plan: ClaimPlan,
) -> Result<(), ClaimError> {
    let (proof, amount) = match plan {
        ClaimPlan::Ready { proof, amount } => (proof, amount),
        plan => return Err(ClaimError::NotReady(plan)),
    };
    contract
        .claim(claimer, amount, &proof)
        .await
        .map_err(ClaimError::Contract)?;
    info!(%claimer, proof_len = proof.len(), "Submitted airdrop claim");
    Ok(())
}
