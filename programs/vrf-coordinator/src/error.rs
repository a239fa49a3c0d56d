use anchor_lang::prelude::*;

#[error_code]
pub enum CoordinatorError {
    #[msg("Signer is not allowed to operate on this account")]
    Unauthorized,
    #[msg("Subscription does not match the request")]
    InvalidSubscription,
    #[msg("Consumer is not registered on the subscription")]
    InvalidConsumer,
    #[msg("Consumer is already registered on the subscription")]
    ConsumerAlreadyRegistered,
    #[msg("Subscription has reached its consumer limit")]
    TooManyConsumers,
    #[msg("Subscription balance does not cover the request fee")]
    InsufficientBalance,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Minimum confirmations out of range")]
    InvalidRequestConfirmations,
    #[msg("Callback compute limit out of range")]
    InvalidCallbackComputeLimit,
    #[msg("Number of random words out of range")]
    InvalidNumWords,
    #[msg("Request has not reached its confirmation depth")]
    ConfirmationsPending,
    #[msg("Supplied random words do not match the request")]
    InvalidRandomWords,
    #[msg("Failed to encode consumer callback")]
    CallbackEncodingFailed,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("This coordinator instance does not accept operator-supplied words")]
    OverrideNotAllowed,
    #[msg("Seed slot hash is no longer in the slot history")]
    SeedSlotUnavailable,
}
