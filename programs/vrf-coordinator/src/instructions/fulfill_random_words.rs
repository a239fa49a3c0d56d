use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::constants::*;
use crate::error::CoordinatorError;
use crate::events::RandomWordsFulfilled;
use crate::state::{callback_data, CoordinatorConfig, RandomnessRequest, Subscription};

/// Accounts required to deliver random words to a consumer.
///
/// Any accounts the consumer's callback needs beyond the relay and the
/// consumer itself are passed as remaining accounts and forwarded as-is.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// Instance operator; receives the fee and the request's rent.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [COORDINATOR_SEED, config.authority.as_ref()],
        bump = config.bump,
        has_one = authority @ CoordinatorError::Unauthorized,
    )]
    pub config: Account<'info, CoordinatorConfig>,

    /// Request being answered; closed once the callback succeeds.
    #[account(
        mut,
        close = authority,
        seeds = [
            REQUEST_SEED,
            config.key().as_ref(),
            request.id.to_le_bytes().as_ref(),
        ],
        bump = request.bump,
    )]
    pub request: Account<'info, RandomnessRequest>,

    #[account(
        mut,
        seeds = [
            SUBSCRIPTION_SEED,
            config.key().as_ref(),
            request.subscription_id.to_le_bytes().as_ref(),
        ],
        bump = subscription.bump,
    )]
    pub subscription: Account<'info, Subscription>,

    /// CHECK: must be the account that signed the request; forwarded writable.
    #[account(
        mut,
        address = request.consumer @ CoordinatorError::InvalidConsumer,
    )]
    pub consumer: UncheckedAccount<'info>,

    /// CHECK: program owning the consumer, recorded at request time.
    #[account(
        executable,
        address = request.consumer_program @ CoordinatorError::InvalidConsumer,
    )]
    pub consumer_program: UncheckedAccount<'info>,

    /// CHECK: PDA that signs the callback; holds no data.
    #[account(
        seeds = [RELAY_SEED, config.key().as_ref()],
        bump = config.relay_bump,
    )]
    pub relay: UncheckedAccount<'info>,

    /// CHECK: `SlotHashes` sysvar, read raw; it is too large to deserialize.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

/// Delivers the words for a pending request.
///
/// Steps:
/// 1. Check the request reached its confirmation depth.
/// 2. Resolve the words: seeded by the first slot hash recorded at or
///    after the confirmation depth, or supplied by the operator on
///    instances that allow it.
/// 3. Invoke the consumer's `fulfill_random_words`, signed by the relay.
/// 4. Charge the subscription and pay the fee to the authority.
///
/// A failing callback fails this instruction; the request stays pending.
pub fn process_fulfill_random_words<'info>(
    ctx: Context<'_, '_, 'info, 'info, FulfillRandomWords<'info>>,
    words_override: Option<Vec<u64>>,
) -> Result<()> {
    let clock = Clock::get()?;
    let request = &ctx.accounts.request;

    if clock.slot < request.ready_at_slot() {
        msg!("Current slot: {}", clock.slot);
        msg!("Ready at slot: {}", request.ready_at_slot());
        return err!(CoordinatorError::ConfirmationsPending);
    }

    let request_id = request.id;
    let subscription_id = request.subscription_id;
    let resolved = {
        let history = ctx.accounts.slot_hashes.try_borrow_data()?;
        request.resolve_words(ctx.accounts.config.allow_override, words_override, &history)?
    };
    let payment = ctx
        .accounts
        .config
        .request_fee(request.callback_compute_limit)?;
    require!(
        ctx.accounts.subscription.balance >= payment,
        CoordinatorError::InsufficientBalance
    );

    let mut accounts = vec![
        AccountMeta::new_readonly(ctx.accounts.relay.key(), true),
        AccountMeta::new(ctx.accounts.consumer.key(), false),
    ];
    let mut account_infos = vec![
        ctx.accounts.relay.to_account_info(),
        ctx.accounts.consumer.to_account_info(),
    ];
    for account in ctx.remaining_accounts.iter() {
        accounts.push(if account.is_writable {
            AccountMeta::new(*account.key, account.is_signer)
        } else {
            AccountMeta::new_readonly(*account.key, account.is_signer)
        });
        account_infos.push(account.clone());
    }
    account_infos.push(ctx.accounts.consumer_program.to_account_info());

    let callback = Instruction {
        program_id: ctx.accounts.consumer_program.key(),
        accounts,
        data: callback_data(request_id, &resolved.words)?,
    };

    let config_key = ctx.accounts.config.key();
    let relay_bump = ctx.accounts.config.relay_bump;
    let relay_seeds: &[&[&[u8]]] = &[&[RELAY_SEED, config_key.as_ref(), &[relay_bump]]];

    match resolved.seed_slot {
        Some(slot) => msg!("Request {} seeded by slot {}", request_id, slot),
        None => msg!("Request {} answered with supplied words", request_id),
    }
    msg!("Delivering request {} to {}", request_id, callback.program_id);
    invoke_signed(&callback, &account_infos, relay_seeds)?;

    ctx.accounts.subscription.charge(payment)?;
    let subscription_info = ctx.accounts.subscription.to_account_info();
    let remaining = subscription_info
        .lamports()
        .checked_sub(payment)
        .ok_or(CoordinatorError::InsufficientBalance)?;
    let credited = ctx
        .accounts
        .authority
        .lamports()
        .checked_add(payment)
        .ok_or(CoordinatorError::MathOverflow)?;
    **subscription_info.try_borrow_mut_lamports()? = remaining;
    **ctx.accounts.authority.try_borrow_mut_lamports()? = credited;

    emit!(RandomWordsFulfilled {
        request_id,
        subscription_id,
        payment,
        seed_slot: resolved.seed_slot,
    });

    Ok(())
}
