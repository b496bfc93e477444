use launchpad_airdrop::{
    Address, ClaimPlan, DistributionMode, DistributionParams, Recipient, TokenAmount, build_tree,
    prepare_claim, submit_claim,
};
use pretty_assertions::assert_eq;

use crate::api::memory_distributor::MemoryDistributor;

#[test_log::test(tokio::test)]
pub async fn run() {
    // Test constants
    let start_time: u32 = 1_700_000_000;
    let now = i64::from(start_time) + 60;
    let per_claimer_amount = TokenAmount::parse_decimal("42").unwrap();

    // Airdrop merkle tree content
    let recipients = (1..=5u8)
        .map(|i| Recipient::new(Address::repeat_byte(i), None))
        .collect::<Vec<_>>();
    let params =
        DistributionParams::new(DistributionMode::Equal).with_default_amount(per_claimer_amount);
    let distribution = build_tree(&recipients, &params).unwrap();

    // Deploy the distributor
    let contract = MemoryDistributor::new(distribution.root, params.mode, start_time);

    // Prepare and submit the claim
    let claimer = Address::repeat_byte(3);
    let plan = prepare_claim(&contract, &claimer, None, &recipients, &params, now)
        .await
        .unwrap();
    assert_eq!(
        plan,
        ClaimPlan::Ready {
            proof: distribution.proofs[&claimer].clone(),
            amount: Some(per_claimer_amount),
        }
    );
    submit_claim(&contract, &claimer, plan).await.unwrap();
    assert_eq!(contract.claimed_count(), 1);

    // A second attempt is caught before anything is submitted
    let plan = prepare_claim(&contract, &claimer, None, &recipients, &params, now)
        .await
        .unwrap();
    assert_eq!(plan, ClaimPlan::AlreadyClaimed);

    // Someone off the list never gets a proof
    let stranger = Address::repeat_byte(0xee);
    let plan = prepare_claim(&contract, &stranger, None, &recipients, &params, now)
        .await
        .unwrap();
    assert_eq!(plan, ClaimPlan::NotEligible);
}
