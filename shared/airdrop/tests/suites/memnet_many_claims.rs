use launchpad_airdrop::{
    Address, ClaimError, ClaimPlan, DistributionMode, DistributionParams, OddNodeRule, Recipient,
    TokenAmount, build_tree, prepare_claim, submit_claim,
};
use pretty_assertions::assert_eq;

use crate::api::memory_distributor::MemoryDistributor;

#[test_log::test(tokio::test)]
pub async fn run() {
    // Airdrop merkle tree content
    let mut recipients = vec![];
    let mut expected_total = TokenAmount::ZERO;
    for i in 0..43u8 {
        let amount = format!("{}.{:02}", 10 + u32::from(i), i);
        expected_total = expected_total
            .checked_add(&TokenAmount::parse_decimal(&amount).unwrap())
            .unwrap();
        let mut address = [0x42u8; 20];
        address[0] = i;
        recipients.push(Recipient::new(Address::from(address), Some(amount)));
    }
    let params = DistributionParams::new(DistributionMode::Custom)
        .with_odd_node_rule(OddNodeRule::Duplicate);
    let distribution = build_tree(&recipients, &params).unwrap();
    let contract = MemoryDistributor::new(distribution.root, params.mode, 0);

    // Every claimer asks for more than allocated first, then for the listed amount
    let mut total_claimed = TokenAmount::ZERO;
    for recipient in &recipients {
        let listed = recipient.amount().unwrap();
        let greedy = format!("{listed}1");
        let plan = prepare_claim(
            &contract,
            &recipient.address,
            Some(&greedy),
            &recipients,
            &params,
            0,
        )
        .await
        .unwrap();
        assert_eq!(plan, ClaimPlan::NotEligible);

        let plan = prepare_claim(
            &contract,
            &recipient.address,
            Some(listed),
            &recipients,
            &params,
            0,
        )
        .await
        .unwrap();
        let ClaimPlan::Ready {
            amount: Some(amount),
            ..
        } = &plan
        else {
            panic!("{} should be ready to claim: {plan:?}", recipient.address);
        };
        total_claimed = total_claimed.checked_add(amount).unwrap();
        submit_claim(&contract, &recipient.address, plan).await.unwrap();
    }
    assert_eq!(contract.claimed_count(), recipients.len());
    assert_eq!(total_claimed, expected_total);

    // The contract itself refuses a replayed claim
    let replay = ClaimPlan::Ready {
        proof: distribution.proofs[&recipients[0].address].clone(),
        amount: Some(TokenAmount::parse_decimal(recipients[0].amount().unwrap()).unwrap()),
    };
    assert!(matches!(
        submit_claim(&contract, &recipients[0].address, replay).await,
        Err(ClaimError::Contract(_))
    ));
}
