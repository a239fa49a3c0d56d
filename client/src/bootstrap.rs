use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;

use verifiable_lottery::lottery_address;
use vrf_coordinator::pda::subscription_address;

use crate::error::ClientError;
use crate::instructions;
use crate::network::NetworkParameters;

/// Instructions that give the lottery a funded subscription, in the order
/// they must land.
#[derive(Clone, Debug, PartialEq)]
pub struct BootstrapPlan {
    /// Id the coordinator will assign on `create_subscription`.
    pub subscription_id: u64,
    pub subscription: Pubkey,
    pub instructions: Vec<Instruction>,
}

impl BootstrapPlan {
    /// Parameters to use once every instruction of the plan has landed.
    pub fn apply(&self, params: &NetworkParameters) -> NetworkParameters {
        NetworkParameters {
            subscription_id: Some(self.subscription_id),
            ..params.clone()
        }
    }
}

/// Plans subscription setup for a cluster without one.
///
/// Returns `None` when the cluster already has a subscription configured.
/// Otherwise creates subscription `next_subscription_id` (read from the
/// coordinator config) owned by `owner`, registers the lottery PDA as its
/// consumer and funds it with `fund_amount` lamports.
pub fn plan_bootstrap(
    params: &NetworkParameters,
    owner: Pubkey,
    next_subscription_id: u64,
    fund_amount: u64,
) -> Result<Option<BootstrapPlan>, ClientError> {
    if params.subscription_id.is_some() {
        return Ok(None);
    }
    if fund_amount == 0 {
        return Err(ClientError::ZeroFunding);
    }

    let config = params.coordinator_config;
    let subscription = subscription_address(&config, next_subscription_id).0;
    let consumer = lottery_address().0;

    Ok(Some(BootstrapPlan {
        subscription_id: next_subscription_id,
        subscription,
        instructions: vec![
            instructions::create_subscription(owner, config, subscription),
            instructions::add_consumer(owner, config, subscription, consumer),
            instructions::fund_subscription(owner, config, subscription, fund_amount),
        ],
    }))
}
