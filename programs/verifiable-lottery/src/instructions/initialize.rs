use anchor_lang::prelude::*;
use vrf_coordinator::CoordinatorConfig;

use crate::constants::*;
use crate::state::{InitializeParams, Lottery};

/// Accounts required to create the lottery.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays rent for the lottery account.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The lottery itself; also holds the pot.
    #[account(
        init,
        payer = authority,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Coordinator instance that will answer this lottery's draws.
    pub coordinator_config: Account<'info, CoordinatorConfig>,

    pub system_program: Program<'info, System>,
}

/// Opens round 1 immediately; the first draw is due `interval` seconds
/// after this instruction lands.
///
/// # Arguments
/// * `ctx` - Context containing Initialize accounts
/// * `params` - Entry fee, round interval and coordinator request settings
pub fn process_initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();
    let coordinator_config = ctx.accounts.coordinator_config.key();

    let lottery = &mut ctx.accounts.lottery;
    lottery.bump = ctx.bumps.lottery;
    lottery.configure(&params, authority, coordinator_config, clock.unix_timestamp)?;

    msg!("Lottery opened at {}", clock.unix_timestamp);
    msg!("Entry fee: {}", lottery.entry_fee);
    msg!("Interval: {}", lottery.interval);
    msg!("Coordinator: {}", coordinator_config);
    Ok(())
}
