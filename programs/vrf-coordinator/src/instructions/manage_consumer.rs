use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::CoordinatorError;
use crate::events::{SubscriptionConsumerAdded, SubscriptionConsumerRemoved};
use crate::state::{CoordinatorConfig, Subscription};

/// Accounts shared by `add_consumer` and `remove_consumer`.
/// Only the subscription owner may change who can spend from it.
#[derive(Accounts)]
pub struct ManageConsumer<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [COORDINATOR_SEED, config.authority.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, CoordinatorConfig>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SEED,
            config.key().as_ref(),
            subscription.id.to_le_bytes().as_ref(),
        ],
        bump = subscription.bump,
        has_one = owner @ CoordinatorError::Unauthorized,
    )]
    pub subscription: Account<'info, Subscription>,
}

/// Authorizes `consumer` (the account that will sign requests) to spend
/// from the subscription.
pub fn process_add_consumer(ctx: Context<ManageConsumer>, consumer: Pubkey) -> Result<()> {
    let subscription = &mut ctx.accounts.subscription;
    subscription.add_consumer(consumer)?;

    emit!(SubscriptionConsumerAdded {
        subscription_id: subscription.id,
        consumer,
    });

    Ok(())
}

pub fn process_remove_consumer(ctx: Context<ManageConsumer>, consumer: Pubkey) -> Result<()> {
    let subscription = &mut ctx.accounts.subscription;
    subscription.remove_consumer(&consumer)?;

    emit!(SubscriptionConsumerRemoved {
        subscription_id: subscription.id,
        consumer,
    });

    Ok(())
}
