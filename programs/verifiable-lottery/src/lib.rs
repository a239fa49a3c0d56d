use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::*;

declare_id!("55HfFeX3mrnCEMQtcTU71fDEGKqBLReaNf34AMP3yju2");

#[program]
pub mod verifiable_lottery {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        process_initialize(ctx, params)
    }

    pub fn enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
        process_enter(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<UpkeepCheck> {
        process_check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        process_perform_upkeep(ctx, perform_data)
    }

    /// Invoked by the coordinator relay with the words for `request_id`.
    pub fn fulfill_random_words<'info>(
        ctx: Context<'_, '_, 'info, 'info, FulfillRandomWords<'info>>,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<()> {
        process_fulfill_random_words(ctx, request_id, random_words)
    }
}
