use anchor_lang::prelude::*;

#[event]
pub struct FeesUpdated {
    pub coordinator: Pubkey,
    pub base_fee: u64,
    pub compute_unit_price: u64,
}

#[event]
pub struct SubscriptionCreated {
    pub subscription_id: u64,
    pub owner: Pubkey,
}

#[event]
pub struct SubscriptionFunded {
    pub subscription_id: u64,
    pub old_balance: u64,
    pub new_balance: u64,
}

#[event]
pub struct SubscriptionConsumerAdded {
    pub subscription_id: u64,
    pub consumer: Pubkey,
}

#[event]
pub struct SubscriptionConsumerRemoved {
    pub subscription_id: u64,
    pub consumer: Pubkey,
}

/// Emitted when a consumer submits a request; off-chain oracles watch for it.
#[event]
pub struct RandomWordsRequested {
    pub request_id: u64,
    pub subscription_id: u64,
    pub key_hash: [u8; 32],
    pub consumer: Pubkey,
    pub minimum_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
    pub requested_at_slot: u64,
}

#[event]
pub struct RandomWordsFulfilled {
    pub request_id: u64,
    pub subscription_id: u64,
    pub payment: u64,
    /// Slot whose hash seeded the words; `None` for operator-supplied words.
    pub seed_slot: Option<u64>,
}

#[event]
pub struct CoordinatorInitialized {
    pub coordinator: Pubkey,
    pub authority: Pubkey,
    pub allow_override: bool,
}
