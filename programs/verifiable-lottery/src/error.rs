use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    #[msg("Paid amount is below the entry fee")]
    InsufficientEntryFee,
    #[msg("Round is not accepting entries")]
    RoundNotAcceptingEntries,
    #[msg("Upkeep conditions not met")]
    UpkeepConditionsNotMet,
    #[msg("Callback was not signed by the randomness relay")]
    UnrecognizedCaller,
    #[msg("Prize transfer to the winner failed")]
    PayoutTransferFailed,
    #[msg("Round has reached its entrant limit")]
    LotteryFull,
    #[msg("Entry fee must be greater than zero")]
    InvalidEntryFee,
    #[msg("Round duration must be greater than zero")]
    InvalidInterval,
    #[msg("Randomness does not answer the pending request")]
    UnknownRequest,
    #[msg("Randomness response carried no words")]
    MissingRandomWords,
    #[msg("Coordinator account does not belong to the randomness program")]
    UnexpectedCoordinator,
    #[msg("Math overflow")]
    MathOverflow,
}
