use serde::{Deserialize, Serialize};

use crate::Recipient;

/// How tokens are split across recipients, and therefore what a leaf commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMode {
    /// Every recipient gets the same externally supplied amount. Leaves commit to the address only.
    Equal,
    /// Each recipient has its own amount, committed into its leaf.
    Custom,
}

impl DistributionMode {
    /// `Custom` as soon as any recipient carries a non-blank amount.
    pub fn detect(recipients: &[Recipient]) -> DistributionMode {
        if recipients
            .iter()
            .any(|recipient| recipient.amount().is_some())
        {
            DistributionMode::Custom
        } else {
            DistributionMode::Equal
        }
    }
}
