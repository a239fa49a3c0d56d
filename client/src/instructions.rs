use anchor_lang::{AnchorDeserialize, InstructionData, ToAccountMetas};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;
use solana_program::sysvar::slot_hashes;

use verifiable_lottery::constants::NUM_WORDS;
use verifiable_lottery::{lottery_address, InitializeParams, Lottery, UpkeepCheck};
use vrf_coordinator::pda::{coordinator_address, relay_address, request_address};
use vrf_coordinator::{derive_random_words, seed_slot_hash};

use crate::error::ClientError;

/// `allow_override` must stay `false` for any instance serving real funds.
pub fn initialize_coordinator(
    authority: Pubkey,
    base_fee: u64,
    compute_unit_price: u64,
    allow_override: bool,
) -> Instruction {
    Instruction {
        program_id: vrf_coordinator::ID,
        accounts: vrf_coordinator::accounts::InitializeCoordinator {
            authority,
            config: coordinator_address(&authority).0,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: vrf_coordinator::instruction::InitializeCoordinator {
            base_fee,
            compute_unit_price,
            allow_override,
        }
        .data(),
    }
}

pub fn set_fees(authority: Pubkey, base_fee: u64, compute_unit_price: u64) -> Instruction {
    Instruction {
        program_id: vrf_coordinator::ID,
        accounts: vrf_coordinator::accounts::SetFees {
            authority,
            config: coordinator_address(&authority).0,
        }
        .to_account_metas(None),
        data: vrf_coordinator::instruction::SetFees {
            base_fee,
            compute_unit_price,
        }
        .data(),
    }
}

pub fn create_subscription(owner: Pubkey, config: Pubkey, subscription: Pubkey) -> Instruction {
    Instruction {
        program_id: vrf_coordinator::ID,
        accounts: vrf_coordinator::accounts::CreateSubscription {
            owner,
            config,
            subscription,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: vrf_coordinator::instruction::CreateSubscription {}.data(),
    }
}

pub fn add_consumer(
    owner: Pubkey,
    config: Pubkey,
    subscription: Pubkey,
    consumer: Pubkey,
) -> Instruction {
    Instruction {
        program_id: vrf_coordinator::ID,
        accounts: vrf_coordinator::accounts::ManageConsumer {
            owner,
            config,
            subscription,
        }
        .to_account_metas(None),
        data: vrf_coordinator::instruction::AddConsumer { consumer }.data(),
    }
}

pub fn fund_subscription(
    funder: Pubkey,
    config: Pubkey,
    subscription: Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: vrf_coordinator::ID,
        accounts: vrf_coordinator::accounts::FundSubscription {
            funder,
            config,
            subscription,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: vrf_coordinator::instruction::FundSubscription { amount }.data(),
    }
}

pub fn initialize_lottery(
    authority: Pubkey,
    coordinator_config: Pubkey,
    params: InitializeParams,
) -> Instruction {
    Instruction {
        program_id: verifiable_lottery::ID,
        accounts: verifiable_lottery::accounts::Initialize {
            authority,
            lottery: lottery_address().0,
            coordinator_config,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: verifiable_lottery::instruction::Initialize { params }.data(),
    }
}

pub fn enter(player: Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: verifiable_lottery::ID,
        accounts: verifiable_lottery::accounts::Enter {
            player,
            lottery: lottery_address().0,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: verifiable_lottery::instruction::Enter { amount }.data(),
    }
}

/// Meant for simulation; the verdict comes back as return data.
pub fn check_upkeep() -> Instruction {
    Instruction {
        program_id: verifiable_lottery::ID,
        accounts: verifiable_lottery::accounts::CheckUpkeep {
            lottery: lottery_address().0,
        }
        .to_account_metas(None),
        data: verifiable_lottery::instruction::CheckUpkeep { check_data: vec![] }.data(),
    }
}

pub fn decode_upkeep_check(return_data: &[u8]) -> Result<UpkeepCheck, ClientError> {
    Ok(UpkeepCheck::try_from_slice(return_data)?)
}

/// `next_request_id` is read from the coordinator config; the request
/// account is created at that id.
pub fn perform_upkeep(
    caller: Pubkey,
    lottery: &Lottery,
    subscription: Pubkey,
    next_request_id: u64,
) -> Instruction {
    Instruction {
        program_id: verifiable_lottery::ID,
        accounts: verifiable_lottery::accounts::PerformUpkeep {
            caller,
            lottery: lottery_address().0,
            coordinator_config: lottery.coordinator_config,
            subscription,
            request: request_address(&lottery.coordinator_config, next_request_id).0,
            coordinator_program: vrf_coordinator::ID,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: verifiable_lottery::instruction::PerformUpkeep { perform_data: vec![] }.data(),
    }
}

/// Where the words of a fulfilment come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordSource {
    /// Hash of the request's seed slot; the coordinator derives the words.
    SeedSlotHash([u8; 32]),
    /// Operator-chosen words. Only instances created with `allow_override`
    /// accept these.
    Override(Vec<u64>),
}

impl WordSource {
    /// Picks the seed the coordinator will use from raw `SlotHashes` data
    /// fetched off-chain.
    pub fn from_slot_history(slot_hashes: &[u8], ready_slot: u64) -> Result<Self, ClientError> {
        let (_, seed) = seed_slot_hash(slot_hashes, ready_slot)
            .map_err(|_| ClientError::SeedUnavailable(ready_slot))?;
        Ok(WordSource::SeedSlotHash(seed))
    }
}

/// Coordinator fulfilment of `request_id` for the lottery.
///
/// The winner is computed here from the same words the coordinator will
/// deliver and appended as a writable remaining account for the payout.
pub fn fulfill_lottery_request(
    authority: Pubkey,
    lottery: &Lottery,
    subscription: Pubkey,
    request_id: u64,
    source: WordSource,
) -> Result<Instruction, ClientError> {
    let (words, words_override) = match source {
        WordSource::SeedSlotHash(seed) => {
            (derive_random_words(&seed, request_id, NUM_WORDS), None)
        }
        WordSource::Override(words) => (words.clone(), Some(words)),
    };
    let (_, winner) = lottery
        .select_winner(request_id, &words)
        .map_err(|_| ClientError::NoWinner(request_id))?;

    let config = lottery.coordinator_config;
    let mut accounts = vrf_coordinator::accounts::FulfillRandomWords {
        authority,
        config,
        request: request_address(&config, request_id).0,
        subscription,
        consumer: lottery_address().0,
        consumer_program: verifiable_lottery::ID,
        relay: relay_address(&config).0,
        slot_hashes: slot_hashes::ID,
    }
    .to_account_metas(None);
    accounts.push(AccountMeta::new(winner, false));

    Ok(Instruction {
        program_id: vrf_coordinator::ID,
        accounts,
        data: vrf_coordinator::instruction::FulfillRandomWords { words_override }.data(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::{AnchorSerialize, Discriminator};
    use verifiable_lottery::{Readiness, RoundState};

    fn drawing_lottery(entrants: &[Pubkey], request_id: u64) -> Lottery {
        let mut lottery = Lottery {
            entry_fee: 1,
            interval: 1,
            round: 1,
            coordinator_config: Pubkey::new_unique(),
            ..Lottery::default()
        };
        for entrant in entrants {
            lottery.record_entry(*entrant, 1).unwrap();
        }
        lottery.state = RoundState::AwaitingRandomness;
        lottery.record_request(request_id);
        lottery
    }

    fn supplied_words(ix: &Instruction) -> Option<Vec<u64>> {
        vrf_coordinator::instruction::FulfillRandomWords::try_from_slice(&ix.data[8..])
            .unwrap()
            .words_override
    }

    /// Raw `SlotHashes` data, newest slot first.
    fn slot_history(slots: &[u64]) -> Vec<u8> {
        let mut data = (slots.len() as u64).to_le_bytes().to_vec();
        for slot in slots {
            data.extend_from_slice(&slot.to_le_bytes());
            data.extend_from_slice(&[*slot as u8; 32]);
        }
        data
    }

    fn pending_request(id: u64, requested_at_slot: u64) -> vrf_coordinator::RandomnessRequest {
        vrf_coordinator::RandomnessRequest {
            bump: 255,
            id,
            subscription_id: 1,
            consumer: lottery_address().0,
            consumer_program: verifiable_lottery::ID,
            key_hash: [0u8; 32],
            minimum_confirmations: 3,
            callback_compute_limit: 200_000,
            num_words: NUM_WORDS,
            requested_at_slot,
        }
    }

    #[test]
    fn fulfilment_appends_the_selected_winner() {
        let entrants: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let lottery = drawing_lottery(&entrants, 5);

        let ix = fulfill_lottery_request(
            Pubkey::new_unique(),
            &lottery,
            Pubkey::new_unique(),
            5,
            WordSource::Override(vec![7]),
        )
        .unwrap();

        assert_eq!(ix.program_id, vrf_coordinator::ID);
        let winner = ix.accounts.last().unwrap();
        assert_eq!(winner.pubkey, entrants[1]);
        assert!(winner.is_writable);
        assert_eq!(ix.accounts[4].pubkey, lottery_address().0);
        assert_eq!(ix.accounts[5].pubkey, verifiable_lottery::ID);
        assert_eq!(
            ix.accounts[6].pubkey,
            relay_address(&lottery.coordinator_config).0
        );
        assert_eq!(ix.accounts[7].pubkey, slot_hashes::ID);

        assert_eq!(supplied_words(&ix), Some(vec![7]));
    }

    #[test]
    fn fulfilment_from_slot_history_matches_coordinator_words() {
        let entrants: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let lottery = drawing_lottery(&entrants, 11);
        let request = pending_request(11, 100);
        let history = slot_history(&[107, 105, 104, 101]);

        let on_chain = request.resolve_words(false, None, &history).unwrap();
        assert_eq!(on_chain.seed_slot, Some(104));
        let expected = on_chain.words[0] % 4;

        let source = WordSource::from_slot_history(&history, request.ready_at_slot()).unwrap();
        let authority = Pubkey::new_unique();
        let subscription = Pubkey::new_unique();
        let ix = fulfill_lottery_request(authority, &lottery, subscription, 11, source).unwrap();
        assert_eq!(ix.accounts.last().unwrap().pubkey, entrants[expected as usize]);

        assert_eq!(supplied_words(&ix), None);
    }

    #[test]
    fn winner_is_not_fixed_by_the_request_id() {
        let entrants: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        let lottery = drawing_lottery(&entrants, 1);

        let winners: std::collections::HashSet<Pubkey> = (0u8..32)
            .map(|byte| {
                let ix = fulfill_lottery_request(
                    Pubkey::new_unique(),
                    &lottery,
                    Pubkey::new_unique(),
                    1,
                    WordSource::SeedSlotHash([byte; 32]),
                )
                .unwrap();
                ix.accounts.last().unwrap().pubkey
            })
            .collect();
        assert!(winners.len() > 1);
    }

    #[test]
    fn seed_must_be_recorded_before_fulfilment() {
        assert!(matches!(
            WordSource::from_slot_history(&slot_history(&[102, 101]), 103),
            Err(ClientError::SeedUnavailable(103))
        ));
    }

    #[test]
    fn fulfilment_of_a_stale_request_is_refused() {
        let lottery = drawing_lottery(&[Pubkey::new_unique()], 2);
        assert!(matches!(
            fulfill_lottery_request(
                Pubkey::new_unique(),
                &lottery,
                Pubkey::new_unique(),
                1,
                WordSource::SeedSlotHash([0u8; 32]),
            ),
            Err(ClientError::NoWinner(1))
        ));
    }

    #[test]
    fn perform_upkeep_targets_the_next_request_account() {
        let lottery = drawing_lottery(&[], 0);
        let subscription = Pubkey::new_unique();
        let ix = perform_upkeep(Pubkey::new_unique(), &lottery, subscription, 8);

        assert_eq!(
            &ix.data[..8],
            &verifiable_lottery::instruction::PerformUpkeep::DISCRIMINATOR
        );
        assert_eq!(ix.accounts[2].pubkey, lottery.coordinator_config);
        assert_eq!(ix.accounts[3].pubkey, subscription);
        assert_eq!(
            ix.accounts[4].pubkey,
            request_address(&lottery.coordinator_config, 8).0
        );
        assert_eq!(ix.accounts[5].pubkey, vrf_coordinator::ID);
    }

    #[test]
    fn upkeep_check_return_data_decodes() {
        let check = UpkeepCheck {
            upkeep_needed: false,
            readiness: Readiness {
                time_passed: true,
                is_open: true,
                has_entrants: false,
                has_balance: true,
            },
            perform_data: vec![],
        };
        let mut bytes = vec![];
        check.serialize(&mut bytes).unwrap();
        assert_eq!(decode_upkeep_check(&bytes).unwrap(), check);
        assert!(matches!(decode_upkeep_check(&[1]), Err(ClientError::Decode(_))));
    }

    #[test]
    fn entry_pays_into_the_lottery_pda() {
        let player = Pubkey::new_unique();
        let ix = enter(player, 42);
        assert_eq!(ix.accounts[0], AccountMeta::new(player, true));
        assert_eq!(ix.accounts[1], AccountMeta::new(lottery_address().0, false));
        let args = verifiable_lottery::instruction::Enter::try_from_slice(&ix.data[8..]).unwrap();
        assert_eq!(args.amount, 42);
    }
}
