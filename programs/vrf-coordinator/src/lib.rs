use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("GjpANDMgy1UmWehEooK8XkxqVWNoaYeuAYgwdbuwFyMG");

#[program]
pub mod vrf_coordinator {
    use super::*;

    pub fn initialize_coordinator(
        ctx: Context<InitializeCoordinator>,
        base_fee: u64,
        compute_unit_price: u64,
        allow_override: bool,
    ) -> Result<()> {
        process_initialize_coordinator(ctx, base_fee, compute_unit_price, allow_override)
    }

    pub fn set_fees(ctx: Context<SetFees>, base_fee: u64, compute_unit_price: u64) -> Result<()> {
        process_set_fees(ctx, base_fee, compute_unit_price)
    }

    pub fn create_subscription(ctx: Context<CreateSubscription>) -> Result<u64> {
        process_create_subscription(ctx)
    }

    pub fn add_consumer(ctx: Context<ManageConsumer>, consumer: Pubkey) -> Result<()> {
        process_add_consumer(ctx, consumer)
    }

    pub fn remove_consumer(ctx: Context<ManageConsumer>, consumer: Pubkey) -> Result<()> {
        process_remove_consumer(ctx, consumer)
    }

    pub fn fund_subscription(ctx: Context<FundSubscription>, amount: u64) -> Result<()> {
        process_fund_subscription(ctx, amount)
    }

    pub fn request_random_words(
        ctx: Context<RequestRandomWords>,
        params: RequestParams,
    ) -> Result<u64> {
        process_request_random_words(ctx, params)
    }

    /// Delivers words to the requesting consumer. Only the instance authority
    /// may call this, but it cannot choose the words unless the instance was
    /// created with `allow_override`.
    pub fn fulfill_random_words<'info>(
        ctx: Context<'_, '_, 'info, 'info, FulfillRandomWords<'info>>,
        words_override: Option<Vec<u64>>,
    ) -> Result<()> {
        process_fulfill_random_words(ctx, words_override)
    }
}
