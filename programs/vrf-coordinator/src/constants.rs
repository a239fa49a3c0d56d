use anchor_lang::prelude::*;

#[constant]
pub const COORDINATOR_SEED: &[u8] = b"coordinator";

#[constant]
pub const SUBSCRIPTION_SEED: &[u8] = b"subscription";

#[constant]
pub const REQUEST_SEED: &[u8] = b"request";

/// Seed of the PDA that signs consumer callbacks, scoped per coordinator instance.
#[constant]
pub const RELAY_SEED: &[u8] = b"relay";

/// Name of the instruction every consumer program must expose for delivery.
pub const CALLBACK_INSTRUCTION: &str = "fulfill_random_words";

pub const MIN_REQUEST_CONFIRMATIONS: u16 = 3;
pub const MAX_REQUEST_CONFIRMATIONS: u16 = 200;

pub const MAX_NUM_WORDS: u32 = 500;

/// Upper bound of a transaction's compute budget.
pub const MAX_CALLBACK_COMPUTE_LIMIT: u32 = 1_400_000;

pub const MAX_CONSUMERS: usize = 16;

/// `compute_unit_price` is quoted in lamports per million callback compute units.
pub const COMPUTE_UNIT_SCALE: u64 = 1_000_000;

/// Bytes per `SlotHashes` entry: slot (u64 LE) followed by its hash.
pub const SLOT_HASH_ENTRY_LEN: usize = 8 + 32;
