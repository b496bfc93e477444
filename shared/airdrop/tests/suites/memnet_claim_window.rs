use launchpad_airdrop::{
    Address, ClaimError, ClaimPlan, DistributionMode, DistributionParams, Recipient, build_tree,
    prepare_claim, submit_claim,
};
use pretty_assertions::assert_eq;

use crate::api::memory_distributor::MemoryDistributor;

fn recipients() -> Vec<Recipient> {
    (1..=4u8)
        .map(|i| Recipient::new(Address::repeat_byte(i), Some(format!("{i}000"))))
        .collect()
}

#[test_log::test(tokio::test)]
pub async fn run_before_start() {
    let recipients = recipients();
    let params = DistributionParams::new(DistributionMode::Custom);
    let distribution = build_tree(&recipients, &params).unwrap();
    let contract = MemoryDistributor::new(distribution.root, params.mode, 1_000);

    let claimer = Address::repeat_byte(1);
    let plan = prepare_claim(&contract, &claimer, None, &recipients, &params, 999)
        .await
        .unwrap();
    assert_eq!(plan, ClaimPlan::NotStarted { start_time: 1_000 });

    // Non-ready plans never reach the contract
    assert!(matches!(
        submit_claim(&contract, &claimer, plan).await,
        Err(ClaimError::NotReady(ClaimPlan::NotStarted { start_time: 1_000 }))
    ));
    assert_eq!(contract.claimed_count(), 0);

    let plan = prepare_claim(&contract, &claimer, None, &recipients, &params, 1_000)
        .await
        .unwrap();
    assert!(matches!(plan, ClaimPlan::Ready { .. }));
}

#[test_log::test(tokio::test)]
pub async fn run_with_outdated_list() {
    let published = recipients();
    let params = DistributionParams::new(DistributionMode::Custom);
    let distribution = build_tree(&published, &params).unwrap();
    let contract = MemoryDistributor::new(distribution.root, params.mode, 0);

    // The local list gained a recipient after the root was published
    let mut local = published.clone();
    local.push(Recipient::new(Address::repeat_byte(9), Some("1".to_string())));

    for claimer in [Address::repeat_byte(1), Address::repeat_byte(9)] {
        let plan = prepare_claim(&contract, &claimer, None, &local, &params, 0)
            .await
            .unwrap();
        assert_eq!(plan, ClaimPlan::NotEligible);
    }

    let plan = prepare_claim(&contract, &Address::repeat_byte(1), None, &published, &params, 0)
        .await
        .unwrap();
    submit_claim(&contract, &Address::repeat_byte(1), plan)
        .await
        .unwrap();
    assert_eq!(contract.claimed_count(), 1);
}
