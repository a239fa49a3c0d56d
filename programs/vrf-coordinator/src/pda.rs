use anchor_lang::prelude::*;

use crate::constants::{COORDINATOR_SEED, RELAY_SEED, REQUEST_SEED, SUBSCRIPTION_SEED};

/// Coordinator instance operated by `authority`.
pub fn coordinator_address(authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[COORDINATOR_SEED, authority.as_ref()], &crate::ID)
}

/// Relay that signs callbacks on behalf of the coordinator instance `config`.
pub fn relay_address(config: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[RELAY_SEED, config.as_ref()], &crate::ID)
}

pub fn subscription_address(config: &Pubkey, subscription_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            SUBSCRIPTION_SEED,
            config.as_ref(),
            subscription_id.to_le_bytes().as_ref(),
        ],
        &crate::ID,
    )
}

pub fn request_address(config: &Pubkey, request_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[REQUEST_SEED, config.as_ref(), request_id.to_le_bytes().as_ref()],
        &crate::ID,
    )
}
