use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::CoordinatorError;
use crate::events::RandomWordsRequested;
use crate::state::{CoordinatorConfig, RandomnessRequest, RequestParams, Subscription};

/// Accounts required to submit a randomness request.
///
/// Normally reached through CPI: the consumer program signs as `requester`
/// with its own PDA, which must be registered on the subscription.
#[derive(Accounts)]
pub struct RequestRandomWords<'info> {
    /// Registered consumer; receives the callback later.
    pub requester: Signer<'info>,

    /// Pays rent for the request account until it is fulfilled.
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
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

    /// Pending request, addressed by the instance's next request id.
    #[account(
        init,
        payer = payer,
        space = 8 + RandomnessRequest::INIT_SPACE,
        seeds = [
            REQUEST_SEED,
            config.key().as_ref(),
            config.next_request_id.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub request: Account<'info, RandomnessRequest>,

    pub system_program: Program<'info, System>,
}

/// Validates and records a request, returning its id synchronously.
/// The words themselves arrive later through the consumer callback.
pub fn process_request_random_words(
    ctx: Context<RequestRandomWords>,
    params: RequestParams,
) -> Result<u64> {
    params.validate()?;
    require!(
        ctx.accounts.subscription.id == params.subscription_id,
        CoordinatorError::InvalidSubscription
    );

    let requester = ctx.accounts.requester.key();
    let fee = ctx
        .accounts
        .config
        .request_fee(params.callback_compute_limit)?;
    ctx.accounts.subscription.authorize_request(&requester, fee)?;

    let clock = Clock::get()?;
    let request_id = ctx.accounts.config.take_request_id()?;
    ctx.accounts.subscription.record_request()?;

    let request = &mut ctx.accounts.request;
    request.bump = ctx.bumps.request;
    request.id = request_id;
    request.subscription_id = params.subscription_id;
    request.consumer = requester;
    request.consumer_program = *ctx.accounts.requester.owner;
    request.key_hash = params.key_hash;
    request.minimum_confirmations = params.minimum_confirmations;
    request.callback_compute_limit = params.callback_compute_limit;
    request.num_words = params.num_words;
    request.requested_at_slot = clock.slot;

    msg!(
        "Request {} for {} word(s), fulfillable from slot {}",
        request_id,
        params.num_words,
        request.ready_at_slot()
    );

    emit!(RandomWordsRequested {
        request_id,
        subscription_id: params.subscription_id,
        key_hash: params.key_hash,
        consumer: requester,
        minimum_confirmations: params.minimum_confirmations,
        callback_compute_limit: params.callback_compute_limit,
        num_words: params.num_words,
        requested_at_slot: clock.slot,
    });

    Ok(request_id)
}
