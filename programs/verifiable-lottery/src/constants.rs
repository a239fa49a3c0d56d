use anchor_lang::prelude::*;

#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Entrants a single round can hold; sizes the lottery account.
pub const MAX_ENTRANTS: usize = 64;

/// Random words requested per draw.
pub const NUM_WORDS: u32 = 1;
