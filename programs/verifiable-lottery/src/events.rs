use anchor_lang::prelude::*;

use crate::state::{Readiness, RoundState};

/// One per entry, so indexers can rebuild the entrant list from logs.
#[event]
pub struct PlayerEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub round: u64,
}

#[event]
pub struct RandomnessRequested {
    pub request_id: u64,
    pub round: u64,
    pub entrants: u32,
}

#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub prize: u64,
    pub request_id: u64,
    pub round: u64,
}

/// Logged with `UpkeepConditionsNotMet` so keepers can see which condition failed.
#[event]
pub struct UpkeepNotNeeded {
    pub balance: u64,
    pub entrants: u32,
    pub state: RoundState,
    pub readiness: Readiness,
}
