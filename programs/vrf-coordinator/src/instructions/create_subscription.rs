use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::SubscriptionCreated;
use crate::state::{CoordinatorConfig, Subscription};

/// Accounts required to open a subscription on a coordinator instance.
#[derive(Accounts)]
pub struct CreateSubscription<'info> {
    /// Future owner of the subscription; pays for the account.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [COORDINATOR_SEED, config.authority.as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, CoordinatorConfig>,

    /// New subscription, addressed by the instance's next subscription id.
    #[account(
        init,
        payer = owner,
        space = 8 + Subscription::INIT_SPACE,
        seeds = [
            SUBSCRIPTION_SEED,
            config.key().as_ref(),
            config.next_subscription_id.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub subscription: Account<'info, Subscription>,

    pub system_program: Program<'info, System>,
}

/// Opens an empty, unfunded subscription and returns its id.
pub fn process_create_subscription(ctx: Context<CreateSubscription>) -> Result<u64> {
    let subscription_id = ctx.accounts.config.take_subscription_id()?;

    let subscription = &mut ctx.accounts.subscription;
    subscription.bump = ctx.bumps.subscription;
    subscription.id = subscription_id;
    subscription.owner = ctx.accounts.owner.key();
    subscription.balance = 0;
    subscription.request_count = 0;
    subscription.consumers = Vec::new();

    emit!(SubscriptionCreated {
        subscription_id,
        owner: subscription.owner,
    });

    Ok(subscription_id)
}
