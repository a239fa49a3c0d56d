use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::{CoordinatorInitialized, FeesUpdated};
use crate::pda::relay_address;
use crate::state::CoordinatorConfig;

/// Accounts required to stand up a coordinator instance.
#[derive(Accounts)]
pub struct InitializeCoordinator<'info> {
    /// Operator of the new instance; pays for the config account.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Instance configuration, one per operator.
    #[account(
        init,
        payer = authority,
        space = 8 + CoordinatorConfig::INIT_SPACE,
        seeds = [COORDINATOR_SEED, authority.key().as_ref()],
        bump
    )]
    pub config: Account<'info, CoordinatorConfig>,

    pub system_program: Program<'info, System>,
}

/// Creates a coordinator instance with the given fee schedule.
///
/// # Arguments
/// * `base_fee` - Flat lamports charged per fulfilled request
/// * `compute_unit_price` - Lamports per million reserved callback compute units
/// * `allow_override` - Let the authority supply words itself; test harnesses only
pub fn process_initialize_coordinator(
    ctx: Context<InitializeCoordinator>,
    base_fee: u64,
    compute_unit_price: u64,
    allow_override: bool,
) -> Result<()> {
    let config_key = ctx.accounts.config.key();
    let (relay, relay_bump) = relay_address(&config_key);

    let config = &mut ctx.accounts.config;
    config.bump = ctx.bumps.config;
    config.relay_bump = relay_bump;
    config.authority = ctx.accounts.authority.key();
    config.base_fee = base_fee;
    config.compute_unit_price = compute_unit_price;
    config.allow_override = allow_override;
    config.next_subscription_id = 1;
    config.next_request_id = 1;

    msg!("Coordinator {} relays through {}", config_key, relay);

    emit!(CoordinatorInitialized {
        coordinator: config_key,
        authority: config.authority,
        allow_override,
    });
    emit!(FeesUpdated {
        coordinator: config_key,
        base_fee,
        compute_unit_price,
    });

    Ok(())
}
