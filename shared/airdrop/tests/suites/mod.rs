mod memnet_claim_window;
mod memnet_many_claims;
mod memnet_single_claim;
