use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::*;
use crate::events::SubscriptionFunded;
use crate::state::{CoordinatorConfig, Subscription};

/// Accounts required to top up a subscription. Anyone may fund.
#[derive(Accounts)]
pub struct FundSubscription<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

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
    )]
    pub subscription: Account<'info, Subscription>,

    pub system_program: Program<'info, System>,
}

/// Moves `amount` lamports from the funder into the subscription PDA.
pub fn process_fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
    let old_balance = ctx.accounts.subscription.balance;
    ctx.accounts.subscription.credit(amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.funder.to_account_info(),
                to: ctx.accounts.subscription.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(SubscriptionFunded {
        subscription_id: ctx.accounts.subscription.id,
        old_balance,
        new_balance: ctx.accounts.subscription.balance,
    });

    Ok(())
}
