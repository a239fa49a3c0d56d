use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::CoordinatorError;
use crate::events::FeesUpdated;
use crate::state::CoordinatorConfig;

#[derive(Accounts)]
pub struct SetFees<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [COORDINATOR_SEED, config.authority.as_ref()],
        bump = config.bump,
        has_one = authority @ CoordinatorError::Unauthorized,
    )]
    pub config: Account<'info, CoordinatorConfig>,
}

pub fn process_set_fees(
    ctx: Context<SetFees>,
    base_fee: u64,
    compute_unit_price: u64,
) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.base_fee = base_fee;
    config.compute_unit_price = compute_unit_price;

    emit!(FeesUpdated {
        coordinator: config.key(),
        base_fee,
        compute_unit_price,
    });

    Ok(())
}
