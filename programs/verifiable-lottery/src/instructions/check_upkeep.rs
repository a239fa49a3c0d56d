use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{current_pot, Lottery, UpkeepCheck};

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Read-only probe used by keepers, usually through simulation. Never
/// mutates the lottery.
pub fn process_check_upkeep(
    ctx: Context<CheckUpkeep>,
    _check_data: Vec<u8>,
) -> Result<UpkeepCheck> {
    let clock = Clock::get()?;
    let pot = current_pot(&ctx.accounts.lottery.to_account_info())?;
    Ok(ctx.accounts.lottery.check_upkeep(clock.unix_timestamp, pot))
}
