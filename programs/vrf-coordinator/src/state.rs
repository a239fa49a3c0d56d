use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::{hash, hashv};

use crate::constants::*;
use crate::error::CoordinatorError;

/// One coordinator instance. Every subscription, request and callback
/// relay is scoped to the address of this account.
#[account]
#[derive(InitSpace)]
pub struct CoordinatorConfig {
    /// Bump of the config PDA.
    pub bump: u8,

    /// Bump of the relay PDA that signs consumer callbacks.
    pub relay_bump: u8,

    /// Operator allowed to fulfill requests and adjust fees.
    /// Fees charged on fulfilment are paid to this key.
    pub authority: Pubkey,

    /// Flat fee (lamports) charged per fulfilled request.
    pub base_fee: u64,

    /// Lamports per million compute units reserved for the callback.
    pub compute_unit_price: u64,

    /// Whether the authority may supply the words itself. Only set on
    /// harness-owned instances; public instances derive every word from
    /// the slot history.
    pub allow_override: bool,

    /// Identifier handed to the next created subscription. Starts at 1.
    pub next_subscription_id: u64,

    /// Identifier handed to the next request. Starts at 1.
    pub next_request_id: u64,
}

impl CoordinatorConfig {
    /// Fee charged for a request reserving `callback_compute_limit` units.
    pub fn request_fee(&self, callback_compute_limit: u32) -> Result<u64> {
        let execution = (callback_compute_limit as u64)
            .checked_mul(self.compute_unit_price)
            .ok_or(CoordinatorError::MathOverflow)?
            / COMPUTE_UNIT_SCALE;
        let fee = self
            .base_fee
            .checked_add(execution)
            .ok_or(CoordinatorError::MathOverflow)?;
        Ok(fee)
    }

    pub fn take_subscription_id(&mut self) -> Result<u64> {
        let id = self.next_subscription_id;
        self.next_subscription_id = id.checked_add(1).ok_or(CoordinatorError::MathOverflow)?;
        Ok(id)
    }

    pub fn take_request_id(&mut self) -> Result<u64> {
        let id = self.next_request_id;
        self.next_request_id = id.checked_add(1).ok_or(CoordinatorError::MathOverflow)?;
        Ok(id)
    }
}

/// Prepaid account paying for the requests of its registered consumers.
/// The balance is held as lamports by the subscription PDA itself.
#[account]
#[derive(InitSpace)]
pub struct Subscription {
    pub bump: u8,
    pub id: u64,
    pub owner: Pubkey,
    pub balance: u64,
    pub request_count: u64,
    #[max_len(MAX_CONSUMERS)]
    pub consumers: Vec<Pubkey>,
}

impl Subscription {
    pub fn is_consumer(&self, consumer: &Pubkey) -> bool {
        self.consumers.contains(consumer)
    }

    pub fn add_consumer(&mut self, consumer: Pubkey) -> Result<()> {
        require!(
            !self.is_consumer(&consumer),
            CoordinatorError::ConsumerAlreadyRegistered
        );
        require!(
            self.consumers.len() < MAX_CONSUMERS,
            CoordinatorError::TooManyConsumers
        );
        self.consumers.push(consumer);
        Ok(())
    }

    pub fn remove_consumer(&mut self, consumer: &Pubkey) -> Result<()> {
        let position = self
            .consumers
            .iter()
            .position(|registered| registered == consumer)
            .ok_or(CoordinatorError::InvalidConsumer)?;
        self.consumers.swap_remove(position);
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, CoordinatorError::InvalidAmount);
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(CoordinatorError::MathOverflow)?;
        Ok(())
    }

    /// Admission check for a new request: the caller must be a registered
    /// consumer and the balance must already cover the fee.
    pub fn authorize_request(&self, consumer: &Pubkey, fee: u64) -> Result<()> {
        require!(self.is_consumer(consumer), CoordinatorError::InvalidConsumer);
        require!(self.balance >= fee, CoordinatorError::InsufficientBalance);
        Ok(())
    }

    pub fn record_request(&mut self) -> Result<()> {
        self.request_count = self
            .request_count
            .checked_add(1)
            .ok_or(CoordinatorError::MathOverflow)?;
        Ok(())
    }

    pub fn charge(&mut self, fee: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(fee)
            .ok_or(CoordinatorError::InsufficientBalance)?;
        Ok(())
    }
}

/// Parameters a consumer sends with every request.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RequestParams {
    /// Lane selecting the oracle key and its cost/latency tier.
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    /// Slots to wait before the request may be fulfilled.
    pub minimum_confirmations: u16,
    /// Compute units reserved for the consumer callback.
    pub callback_compute_limit: u32,
    pub num_words: u32,
}

impl RequestParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            (MIN_REQUEST_CONFIRMATIONS..=MAX_REQUEST_CONFIRMATIONS)
                .contains(&self.minimum_confirmations),
            CoordinatorError::InvalidRequestConfirmations
        );
        require!(
            self.callback_compute_limit > 0
                && self.callback_compute_limit <= MAX_CALLBACK_COMPUTE_LIMIT,
            CoordinatorError::InvalidCallbackComputeLimit
        );
        require!(
            self.num_words > 0 && self.num_words <= MAX_NUM_WORDS,
            CoordinatorError::InvalidNumWords
        );
        Ok(())
    }
}

/// An outstanding request. Closed when it is fulfilled.
#[account]
#[derive(InitSpace)]
pub struct RandomnessRequest {
    pub bump: u8,
    pub id: u64,
    pub subscription_id: u64,
    /// Account that signed the request; handed back to the callback.
    pub consumer: Pubkey,
    /// Program owning `consumer`; the callback is invoked on it.
    pub consumer_program: Pubkey,
    pub key_hash: [u8; 32],
    pub minimum_confirmations: u16,
    pub callback_compute_limit: u32,
    pub num_words: u32,
    pub requested_at_slot: u64,
}

impl RandomnessRequest {
    pub fn ready_at_slot(&self) -> u64 {
        self.requested_at_slot
            .saturating_add(self.minimum_confirmations as u64)
    }

    /// Words delivered for this request.
    ///
    /// Without an override the words are seeded by the hash of the first
    /// recorded slot at or after [`RandomnessRequest::ready_at_slot`], which
    /// did not exist when the request was made. `slot_hashes` is the raw
    /// `SlotHashes` sysvar data.
    pub fn resolve_words(
        &self,
        allow_override: bool,
        words_override: Option<Vec<u64>>,
        slot_hashes: &[u8],
    ) -> Result<ResolvedWords> {
        match words_override {
            Some(words) => {
                require!(allow_override, CoordinatorError::OverrideNotAllowed);
                require!(
                    words.len() == self.num_words as usize,
                    CoordinatorError::InvalidRandomWords
                );
                Ok(ResolvedWords {
                    words,
                    seed_slot: None,
                })
            }
            None => {
                let (seed_slot, seed) = seed_slot_hash(slot_hashes, self.ready_at_slot())?;
                Ok(ResolvedWords {
                    words: derive_random_words(&seed, self.id, self.num_words),
                    seed_slot: Some(seed_slot),
                })
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWords {
    pub words: Vec<u64>,
    pub seed_slot: Option<u64>,
}

/// Hash of the earliest recorded slot at or after `ready_slot`.
///
/// `SlotHashes` lists slots newest first, so the scan stops at the first
/// slot older than `ready_slot`. If the history ends before reaching one,
/// the true seed slot may have been pruned and no seed is returned.
pub fn seed_slot_hash(slot_hashes: &[u8], ready_slot: u64) -> Result<(u64, [u8; 32])> {
    let mut len = [0u8; 8];
    len.copy_from_slice(
        slot_hashes
            .get(..8)
            .ok_or(CoordinatorError::SeedSlotUnavailable)?,
    );
    let count = u64::from_le_bytes(len) as usize;

    let mut seed = None;
    for index in 0..count {
        let start = 8 + index * SLOT_HASH_ENTRY_LEN;
        let entry = slot_hashes
            .get(start..start + SLOT_HASH_ENTRY_LEN)
            .ok_or(CoordinatorError::SeedSlotUnavailable)?;
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&entry[..8]);
        let slot = u64::from_le_bytes(slot);
        if slot < ready_slot {
            return seed.ok_or_else(|| error!(CoordinatorError::ConfirmationsPending));
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&entry[8..]);
        seed = Some((slot, hash));
    }

    match seed {
        Some(_) => err!(CoordinatorError::SeedSlotUnavailable),
        None => err!(CoordinatorError::ConfirmationsPending),
    }
}

/// Words for `request_id` under `seed`, one hash per index.
pub fn derive_random_words(seed: &[u8; 32], request_id: u64, num_words: u32) -> Vec<u64> {
    (0..num_words)
        .map(|index| {
            let digest = hashv(&[
                seed.as_ref(),
                request_id.to_le_bytes().as_ref(),
                index.to_le_bytes().as_ref(),
            ])
            .to_bytes();
            let mut word = [0u8; 8];
            word.copy_from_slice(&digest[..8]);
            u64::from_le_bytes(word)
        })
        .collect()
}

/// Anchor discriminator of the consumer's `fulfill_random_words` instruction.
pub fn callback_discriminator() -> [u8; 8] {
    let preimage = format!("global:{}", CALLBACK_INSTRUCTION);
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

/// Instruction data for the consumer callback `(request_id, random_words)`.
pub fn callback_data(request_id: u64, random_words: &[u64]) -> Result<Vec<u8>> {
    let mut data = callback_discriminator().to_vec();
    request_id
        .serialize(&mut data)
        .map_err(|_| CoordinatorError::CallbackEncodingFailed)?;
    random_words
        .to_vec()
        .serialize(&mut data)
        .map_err(|_| CoordinatorError::CallbackEncodingFailed)?;
    Ok(data)
}
