use anchor_lang::prelude::*;
use vrf_coordinator::cpi::accounts::RequestRandomWords;
use vrf_coordinator::program::VrfCoordinator;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::RandomnessRequested;
use crate::state::{current_pot, Lottery};

/// Accounts required to close the round and request randomness.
///
/// Anyone may call this; the readiness conditions are re-checked here.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// Keeper triggering the draw; pays rent for the pending request.
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// CHECK: must be the configured instance; the coordinator checks the rest.
    #[account(
        mut,
        address = lottery.coordinator_config @ LotteryError::UnexpectedCoordinator,
    )]
    pub coordinator_config: UncheckedAccount<'info>,

    /// CHECK: validated by the coordinator against `lottery.subscription_id`.
    #[account(mut)]
    pub subscription: UncheckedAccount<'info>,

    /// CHECK: created by the coordinator at its next request id.
    #[account(mut)]
    pub request: UncheckedAccount<'info>,

    pub coordinator_program: Program<'info, VrfCoordinator>,

    pub system_program: Program<'info, System>,
}

/// Moves the round to `AwaitingRandomness` and submits a single-word
/// request, signed by the lottery PDA as the registered consumer.
///
/// Steps performed:
/// 1. Re-evaluate readiness; fail without side effects if not ready.
/// 2. Request one random word from the coordinator.
/// 3. Record the returned request id.
pub fn process_perform_upkeep(
    ctx: Context<PerformUpkeep>,
    _perform_data: Vec<u8>,
) -> Result<()> {
    let clock = Clock::get()?;
    let pot = current_pot(&ctx.accounts.lottery.to_account_info())?;
    ctx.accounts.lottery.begin_draw(clock.unix_timestamp, pot)?;

    let bump = ctx.accounts.lottery.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[LOTTERY_SEED, &[bump]]];

    let request_id = vrf_coordinator::cpi::request_random_words(
        CpiContext::new_with_signer(
            ctx.accounts.coordinator_program.to_account_info(),
            RequestRandomWords {
                requester: ctx.accounts.lottery.to_account_info(),
                payer: ctx.accounts.caller.to_account_info(),
                config: ctx.accounts.coordinator_config.to_account_info(),
                subscription: ctx.accounts.subscription.to_account_info(),
                request: ctx.accounts.request.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
            },
            signer_seeds,
        ),
        ctx.accounts.lottery.request_params(),
    )?
    .get();

    let lottery = &mut ctx.accounts.lottery;
    lottery.record_request(request_id);

    msg!("Requested randomness: {}", request_id);
    emit!(RandomnessRequested {
        request_id,
        round: lottery.round,
        entrants: lottery.entrant_count() as u32,
    });

    Ok(())
}
