use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unknown cluster `{0}`; expected mainnet, devnet or localnet")]
    UnknownCluster(String),

    #[error("no subscription configured for this cluster; bootstrap one first")]
    MissingSubscription,

    #[error("subscription funding must be greater than zero")]
    ZeroFunding,

    #[error("local coordinator has not been provisioned yet")]
    LocalCoordinatorMissing,

    #[error("slot history has no usable seed for ready slot {0}")]
    SeedUnavailable(u64),

    #[error("request {0} does not select a winner for the current round")]
    NoWinner(u64),

    #[error("failed to decode return data: {0}")]
    Decode(#[from] std::io::Error),
}
