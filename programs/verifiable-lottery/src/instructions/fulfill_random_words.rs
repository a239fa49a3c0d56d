use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::events::WinnerPicked;
use crate::state::{current_pot, Lottery};

/// Accounts passed by the coordinator when it delivers random words.
///
/// The winner is only known once the words arrive, so the delivering
/// party appends every entrant it may need to pay as remaining accounts.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// Relay PDA of the configured coordinator.
    pub relay: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,
}

/// Picks the winner for the pending request and pays out the whole pot.
///
/// Steps performed:
/// 1. Reject any signer other than the coordinator relay.
/// 2. Match the request id and pick `words[0] % entrants`.
/// 3. Move every lamport above rent to the winner.
/// 4. Reset the round and reopen it at the current time.
///
/// A failed payout reverts the whole callback; the round stays in
/// `AwaitingRandomness`.
pub fn process_fulfill_random_words<'info>(
    ctx: Context<'_, '_, 'info, 'info, FulfillRandomWords<'info>>,
    request_id: u64,
    random_words: Vec<u64>,
) -> Result<()> {
    let lottery = &ctx.accounts.lottery;
    lottery.ensure_relay(&ctx.accounts.relay.key())?;
    let (index, winner) = lottery.select_winner(request_id, &random_words)?;

    let winner_info = winner_account(ctx.remaining_accounts, &winner)?;

    let lottery_info = ctx.accounts.lottery.to_account_info();
    let prize = current_pot(&lottery_info)?;
    transfer_prize(&lottery_info, winner_info, prize)?;

    let clock = Clock::get()?;
    let round = ctx.accounts.lottery.round;
    ctx.accounts
        .lottery
        .complete_round(winner, clock.unix_timestamp)?;

    msg!("Winner of round {}: entrant #{} {}", round, index, winner);
    emit!(WinnerPicked {
        winner,
        prize,
        request_id,
        round,
    });

    Ok(())
}

/// The supplied account of `winner`; it must be writable to receive the prize.
pub fn winner_account<'a, 'info>(
    remaining_accounts: &'a [AccountInfo<'info>],
    winner: &Pubkey,
) -> Result<&'a AccountInfo<'info>> {
    let account = remaining_accounts
        .iter()
        .find(|account| account.key == winner)
        .ok_or(LotteryError::PayoutTransferFailed)?;
    require!(account.is_writable, LotteryError::PayoutTransferFailed);
    Ok(account)
}

/// Moves `amount` lamports out of the program-owned lottery account.
pub fn transfer_prize(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    require!(to.is_writable, LotteryError::PayoutTransferFailed);
    let remaining = from
        .lamports()
        .checked_sub(amount)
        .ok_or(LotteryError::PayoutTransferFailed)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(LotteryError::PayoutTransferFailed)?;

    **from.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::prize_pool;
    use crate::state::tests::{error_code, lottery_at, ENTRY_FEE};
    use anchor_lang::Discriminator;
    use solana_program::clock::Epoch;

    const RENT_MINIMUM: u64 = 2_500_000;

    #[test]
    fn coordinator_calls_this_instruction() {
        assert_eq!(
            vrf_coordinator::callback_discriminator(),
            crate::instruction::FulfillRandomWords::DISCRIMINATOR
        );
    }

    // Scenario A end to end: second entrant wins the 0.02 pot.
    #[test]
    fn winner_receives_pot_above_rent() {
        let mut lottery = lottery_at(0);
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        lottery.record_entry(first, ENTRY_FEE).unwrap();
        lottery.record_entry(second, ENTRY_FEE).unwrap();

        let mut pot_lamports = RENT_MINIMUM + 2 * ENTRY_FEE;
        let pot = prize_pool(pot_lamports, RENT_MINIMUM);
        assert_eq!(pot, 20_000_000);
        lottery.begin_draw(31, pot).unwrap();
        lottery.record_request(1);
        lottery.ensure_relay(&lottery.relay).unwrap();

        let (_, winner) = lottery.select_winner(1, &[7]).unwrap();
        assert_eq!(winner, second);

        let lottery_key = Pubkey::new_unique();
        let owner = crate::ID;
        let system = Pubkey::default();
        let mut lottery_data = vec![0u8; 16];
        let mut winner_lamports = 1_000;
        let mut winner_data = vec![];
        let lottery_info = AccountInfo::new(
            &lottery_key,
            false,
            true,
            &mut pot_lamports,
            &mut lottery_data,
            &owner,
            false,
            Epoch::default(),
        );
        let winner_info = AccountInfo::new(
            &winner,
            false,
            true,
            &mut winner_lamports,
            &mut winner_data,
            &system,
            false,
            Epoch::default(),
        );

        transfer_prize(&lottery_info, &winner_info, pot).unwrap();
        assert_eq!(winner_info.lamports(), 1_000 + 20_000_000);
        assert_eq!(lottery_info.lamports(), RENT_MINIMUM);

        lottery.complete_round(winner, 40).unwrap();
        assert_eq!(lottery.last_winner, Some(second));
        assert!(lottery.entrants.is_empty());
    }

    #[test]
    fn payout_to_readonly_account_fails() {
        let key = Pubkey::new_unique();
        let winner = Pubkey::new_unique();
        let owner = crate::ID;
        let system = Pubkey::default();
        let mut from_lamports = 10;
        let mut to_lamports = 0;
        let mut from_data = vec![];
        let mut to_data = vec![];
        let from = AccountInfo::new(
            &key,
            false,
            true,
            &mut from_lamports,
            &mut from_data,
            &owner,
            false,
            Epoch::default(),
        );
        let to = AccountInfo::new(
            &winner,
            false,
            false,
            &mut to_lamports,
            &mut to_data,
            &system,
            false,
            Epoch::default(),
        );

        assert_eq!(
            error_code(transfer_prize(&from, &to, 5).unwrap_err()),
            u32::from(LotteryError::PayoutTransferFailed)
        );
        assert_eq!(from.lamports(), 10);
        assert_eq!(to.lamports(), 0);
    }

    #[test]
    fn payout_larger_than_balance_fails() {
        let key = Pubkey::new_unique();
        let winner = Pubkey::new_unique();
        let owner = crate::ID;
        let mut from_lamports = 10;
        let mut to_lamports = 0;
        let mut from_data = vec![];
        let mut to_data = vec![];
        let from = AccountInfo::new(
            &key,
            false,
            true,
            &mut from_lamports,
            &mut from_data,
            &owner,
            false,
            Epoch::default(),
        );
        let to = AccountInfo::new(
            &winner,
            false,
            true,
            &mut to_lamports,
            &mut to_data,
            &owner,
            false,
            Epoch::default(),
        );

        assert_eq!(
            error_code(transfer_prize(&from, &to, 11).unwrap_err()),
            u32::from(LotteryError::PayoutTransferFailed)
        );
    }

    #[test]
    fn winner_must_be_among_the_supplied_accounts() {
        let winner = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let system = Pubkey::default();
        let mut winner_lamports = 0;
        let mut other_lamports = 0;
        let mut winner_data = vec![];
        let mut other_data = vec![];
        let other_info = AccountInfo::new(
            &other,
            false,
            true,
            &mut other_lamports,
            &mut other_data,
            &system,
            false,
            Epoch::default(),
        );

        let supplied = [other_info.clone()];
        assert_eq!(
            error_code(winner_account(&supplied, &winner).unwrap_err()),
            u32::from(LotteryError::PayoutTransferFailed)
        );
        assert_eq!(
            error_code(winner_account(&[], &winner).unwrap_err()),
            u32::from(LotteryError::PayoutTransferFailed)
        );

        let winner_info = AccountInfo::new(
            &winner,
            false,
            true,
            &mut winner_lamports,
            &mut winner_data,
            &system,
            false,
            Epoch::default(),
        );
        let supplied = [other_info, winner_info];
        assert_eq!(winner_account(&supplied, &winner).unwrap().key, &winner);
    }

    #[test]
    fn readonly_winner_account_is_refused() {
        let winner = Pubkey::new_unique();
        let system = Pubkey::default();
        let mut lamports = 0;
        let mut data = vec![];
        let readonly = AccountInfo::new(
            &winner,
            false,
            false,
            &mut lamports,
            &mut data,
            &system,
            false,
            Epoch::default(),
        );

        assert_eq!(
            error_code(winner_account(&[readonly], &winner).unwrap_err()),
            u32::from(LotteryError::PayoutTransferFailed)
        );
    }

    // Scenario D: an impostor callback changes nothing.
    #[test]
    fn impostor_callback_is_rejected_before_selection() {
        let mut lottery = lottery_at(0);
        lottery.record_entry(Pubkey::new_unique(), ENTRY_FEE).unwrap();
        lottery.begin_draw(60, ENTRY_FEE).unwrap();
        lottery.record_request(9);
        let before = lottery.clone();

        assert_eq!(
            error_code(lottery.ensure_relay(&Pubkey::new_unique()).unwrap_err()),
            u32::from(LotteryError::UnrecognizedCaller)
        );
        assert_eq!(lottery, before);
    }
}
