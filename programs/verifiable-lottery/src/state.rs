use anchor_lang::prelude::*;
use vrf_coordinator::pda::relay_address;
use vrf_coordinator::RequestParams;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::UpkeepNotNeeded;

#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Default, Debug,
)]
pub enum RoundState {
    /// Accepting entries.
    #[default]
    Open,
    /// Draw requested; entries and re-triggering are rejected until the
    /// coordinator delivers the words.
    AwaitingRandomness,
}

/// Arguments of `initialize`, fixed for the lifetime of the lottery.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    /// Minimum lamports per entry.
    pub entry_fee: u64,
    /// Seconds a round stays open before it may be drawn.
    pub interval: i64,
    /// Coordinator lane.
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
    pub minimum_confirmations: u16,
}

#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// Key that initialized the lottery. Holds no special powers afterwards.
    pub authority: Pubkey,

    /// The minimum amount (in lamports) a single entry must pay.
    pub entry_fee: u64,

    /// Round duration in seconds.
    pub interval: i64,

    /// UNIX timestamp at which the current round opened.
    pub round_started_at: i64,

    /// 1-based number of the current round.
    pub round: u64,

    pub state: RoundState,

    /// Entrants of the current round in entry order. A player entering
    /// twice holds two slots.
    #[max_len(MAX_ENTRANTS)]
    pub entrants: Vec<Pubkey>,

    /// Winner of the most recently completed round.
    pub last_winner: Option<Pubkey>,

    /// Coordinator request answering the current draw.
    pub pending_request: Option<u64>,

    /// Coordinator instance serving this lottery.
    pub coordinator_config: Pubkey,

    /// Relay PDA of `coordinator_config`; the only accepted callback signer.
    pub relay: Pubkey,

    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_limit: u32,
    pub minimum_confirmations: u16,
}

/// Individual readiness conditions, reported alongside the verdict so a
/// keeper can tell "too early" from "no entrants" from "already drawing".
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Readiness {
    pub time_passed: bool,
    pub is_open: bool,
    pub has_entrants: bool,
    pub has_balance: bool,
}

impl Readiness {
    pub fn upkeep_needed(&self) -> bool {
        self.time_passed && self.is_open && self.has_entrants && self.has_balance
    }
}

/// Return value of `check_upkeep`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub readiness: Readiness,
    /// Opaque payload for `perform_upkeep`; always empty.
    pub perform_data: Vec<u8>,
}

impl Lottery {
    /// Fills a freshly created account and opens round 1 at `now`.
    pub fn configure(
        &mut self,
        params: &InitializeParams,
        authority: Pubkey,
        coordinator_config: Pubkey,
        now: i64,
    ) -> Result<()> {
        require!(params.entry_fee > 0, LotteryError::InvalidEntryFee);
        require!(params.interval > 0, LotteryError::InvalidInterval);

        self.authority = authority;
        self.entry_fee = params.entry_fee;
        self.interval = params.interval;
        self.round_started_at = now;
        self.round = 1;
        self.state = RoundState::Open;
        self.entrants = Vec::with_capacity(MAX_ENTRANTS);
        self.last_winner = None;
        self.pending_request = None;
        self.coordinator_config = coordinator_config;
        self.relay = relay_address(&coordinator_config).0;
        self.key_hash = params.key_hash;
        self.subscription_id = params.subscription_id;
        self.callback_compute_limit = params.callback_compute_limit;
        self.minimum_confirmations = params.minimum_confirmations;
        Ok(())
    }

    pub fn entrant_count(&self) -> usize {
        self.entrants.len()
    }

    /// Evaluates every draw precondition. Reads only.
    pub fn readiness(&self, now: i64, pot: u64) -> Readiness {
        Readiness {
            time_passed: now.saturating_sub(self.round_started_at) >= self.interval,
            is_open: self.state == RoundState::Open,
            has_entrants: !self.entrants.is_empty(),
            has_balance: pot > 0,
        }
    }

    pub fn check_upkeep(&self, now: i64, pot: u64) -> UpkeepCheck {
        let readiness = self.readiness(now, pot);
        UpkeepCheck {
            upkeep_needed: readiness.upkeep_needed(),
            readiness,
            perform_data: Vec::new(),
        }
    }

    /// Appends `player` to the current round after checking the payment,
    /// the round state and the capacity, in that order.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.entry_fee,
            LotteryError::InsufficientEntryFee
        );
        require!(
            self.state == RoundState::Open,
            LotteryError::RoundNotAcceptingEntries
        );
        require!(
            self.entrants.len() < MAX_ENTRANTS,
            LotteryError::LotteryFull
        );
        self.entrants.push(player);
        Ok(())
    }

    /// `Open -> AwaitingRandomness`. Re-checks every readiness condition
    /// itself; the caller may never have looked at `check_upkeep`.
    pub fn begin_draw(&mut self, now: i64, pot: u64) -> Result<()> {
        let readiness = self.readiness(now, pot);
        if !readiness.upkeep_needed() {
            msg!(
                "Upkeep not needed: balance={}, entrants={}, state={:?}",
                pot,
                self.entrants.len(),
                self.state
            );
            emit!(self.upkeep_report(pot, readiness));
            return err!(LotteryError::UpkeepConditionsNotMet);
        }
        self.state = RoundState::AwaitingRandomness;
        Ok(())
    }

    pub fn upkeep_report(&self, pot: u64, readiness: Readiness) -> UpkeepNotNeeded {
        UpkeepNotNeeded {
            balance: pot,
            entrants: self.entrants.len() as u32,
            state: self.state,
            readiness,
        }
    }

    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            key_hash: self.key_hash,
            subscription_id: self.subscription_id,
            minimum_confirmations: self.minimum_confirmations,
            callback_compute_limit: self.callback_compute_limit,
            num_words: NUM_WORDS,
        }
    }

    pub fn record_request(&mut self, request_id: u64) {
        self.pending_request = Some(request_id);
    }

    pub fn ensure_relay(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.relay, LotteryError::UnrecognizedCaller);
        Ok(())
    }

    /// Maps the first word of the pending request's answer to an entrant.
    pub fn select_winner(&self, request_id: u64, random_words: &[u64]) -> Result<(usize, Pubkey)> {
        require!(
            self.state == RoundState::AwaitingRandomness
                && self.pending_request == Some(request_id),
            LotteryError::UnknownRequest
        );
        let word = random_words
            .first()
            .ok_or(LotteryError::MissingRandomWords)?;
        let index = winner_index(*word, self.entrants.len())
            .ok_or(LotteryError::UnknownRequest)?;
        Ok((index, self.entrants[index]))
    }

    /// `AwaitingRandomness -> Open`, after the prize has been moved.
    pub fn complete_round(&mut self, winner: Pubkey, now: i64) -> Result<()> {
        self.round = self.round.checked_add(1).ok_or(LotteryError::MathOverflow)?;
        self.last_winner = Some(winner);
        self.entrants.clear();
        self.round_started_at = now;
        self.pending_request = None;
        self.state = RoundState::Open;
        Ok(())
    }
}

/// `random_word mod entrant_count`, or `None` for an empty round.
pub fn winner_index(random_word: u64, entrant_count: usize) -> Option<usize> {
    if entrant_count == 0 {
        return None;
    }
    Some((random_word % entrant_count as u64) as usize)
}

/// Lamports above the rent-exempt minimum; this is what the winner takes.
pub fn prize_pool(lamports: u64, rent_exempt_minimum: u64) -> u64 {
    lamports.saturating_sub(rent_exempt_minimum)
}

pub fn current_pot(lottery: &AccountInfo) -> Result<u64> {
    let rent = Rent::get()?;
    Ok(prize_pool(
        lottery.lamports(),
        rent.minimum_balance(lottery.data_len()),
    ))
}

pub fn lottery_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LOTTERY_SEED], &crate::ID)
}
