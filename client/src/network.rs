use std::fmt;
use std::str::FromStr;

use hex_literal::hex;
use solana_program::instruction::Instruction;
use solana_program::native_token::LAMPORTS_PER_SOL;
use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

use verifiable_lottery::InitializeParams;
use vrf_coordinator::pda::coordinator_address;

use crate::error::ClientError;
use crate::instructions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cluster {
    Mainnet,
    Devnet,
    Localnet,
}

impl FromStr for Cluster {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            "devnet" => Ok(Cluster::Devnet),
            "localnet" | "localhost" => Ok(Cluster::Localnet),
            other => Err(ClientError::UnknownCluster(other.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Mainnet => "mainnet",
            Cluster::Devnet => "devnet",
            Cluster::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// Everything the lottery needs to know about the cluster it runs on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkParameters {
    pub entry_fee: u64,
    pub interval: i64,
    pub coordinator_config: Pubkey,
    pub key_hash: [u8; 32],
    /// `None` until a subscription has been bootstrapped.
    pub subscription_id: Option<u64>,
    pub callback_compute_limit: u32,
    pub minimum_confirmations: u16,
}

impl NetworkParameters {
    pub fn initialize_params(&self) -> Result<InitializeParams, ClientError> {
        let subscription_id = self
            .subscription_id
            .ok_or(ClientError::MissingSubscription)?;
        Ok(InitializeParams {
            entry_fee: self.entry_fee,
            interval: self.interval,
            key_hash: self.key_hash,
            subscription_id,
            callback_compute_limit: self.callback_compute_limit,
            minimum_confirmations: self.minimum_confirmations,
        })
    }
}

const DEVNET_COORDINATOR: Pubkey = pubkey!("HcJHJczEUQkMnrPpGgusHS1xBNvjeQxBbqpDFfv4faCB");
const DEVNET_KEY_HASH: [u8; 32] =
    hex!("7aa2ad9bc93f6b7acfecc45479eafd92d1d4196287981ffb5873d2c0857d6f66");

const MAINNET_COORDINATOR: Pubkey = pubkey!("Fh9L4Phf3DWgQpS9FjyEbBX2VZbEzwcbkBcB8QqsaY5Y");
const MAINNET_KEY_HASH: [u8; 32] =
    hex!("0c8f1a009b5871f06e4fe6d774391a893f992190f95cb1cabea616076088bda9");

// Any value works against the local stand-in.
const LOCAL_KEY_HASH: [u8; 32] =
    hex!("66e011a23b276c7bb37f2a411114ea261e197d80b504c83857d5efe797155db2");

fn devnet() -> NetworkParameters {
    NetworkParameters {
        entry_fee: LAMPORTS_PER_SOL / 100,
        interval: 30,
        coordinator_config: DEVNET_COORDINATOR,
        key_hash: DEVNET_KEY_HASH,
        subscription_id: Some(1),
        callback_compute_limit: 500_000,
        minimum_confirmations: 3,
    }
}

fn mainnet() -> NetworkParameters {
    NetworkParameters {
        entry_fee: LAMPORTS_PER_SOL / 10,
        interval: 300,
        coordinator_config: MAINNET_COORDINATOR,
        key_hash: MAINNET_KEY_HASH,
        subscription_id: None,
        callback_compute_limit: 500_000,
        minimum_confirmations: 32,
    }
}

/// Fees of the local stand-in coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockCoordinatorSettings {
    pub base_fee: u64,
    /// Micro-lamports per callback compute unit.
    pub compute_unit_price: u64,
}

impl Default for MockCoordinatorSettings {
    fn default() -> Self {
        MockCoordinatorSettings {
            base_fee: LAMPORTS_PER_SOL / 4_000,
            compute_unit_price: 1_000,
        }
    }
}

/// Resolves per-cluster parameters for one session.
///
/// Localnet has no coordinator of its own, so the first resolution
/// provisions one owned by `harness`. The queued instructions are handed
/// out once through [`ConfigResolver::take_provisioning`].
#[derive(Debug)]
pub struct ConfigResolver {
    harness: Pubkey,
    mock: MockCoordinatorSettings,
    local_coordinator: Option<Pubkey>,
    provisioning: Vec<Instruction>,
}

impl ConfigResolver {
    pub fn new(harness: Pubkey, mock: MockCoordinatorSettings) -> Self {
        ConfigResolver {
            harness,
            mock,
            local_coordinator: None,
            provisioning: Vec::new(),
        }
    }

    pub fn resolve(&mut self, cluster: Cluster) -> NetworkParameters {
        match cluster {
            Cluster::Mainnet => mainnet(),
            Cluster::Devnet => devnet(),
            Cluster::Localnet => NetworkParameters {
                coordinator_config: self.provision_local_coordinator(),
                key_hash: LOCAL_KEY_HASH,
                subscription_id: None,
                ..devnet()
            },
        }
    }

    fn provision_local_coordinator(&mut self) -> Pubkey {
        if let Some(config) = self.local_coordinator {
            return config;
        }
        let config = coordinator_address(&self.harness).0;
        self.provisioning.push(instructions::initialize_coordinator(
            self.harness,
            self.mock.base_fee,
            self.mock.compute_unit_price,
            true,
        ));
        self.local_coordinator = Some(config);
        config
    }

    /// Instructions still to be sent before the local coordinator exists.
    pub fn take_provisioning(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.provisioning)
    }

    pub fn local_coordinator(&self) -> Option<Pubkey> {
        self.local_coordinator
    }

    pub fn mock(&self) -> MockCoordinatorSettings {
        self.mock
    }

    /// Adjusts the stand-in's fees, e.g. to exercise underfunded subscriptions.
    pub fn set_mock_fees(
        &mut self,
        base_fee: u64,
        compute_unit_price: u64,
    ) -> Result<Instruction, ClientError> {
        if self.local_coordinator.is_none() {
            return Err(ClientError::LocalCoordinatorMissing);
        }
        self.mock = MockCoordinatorSettings {
            base_fee,
            compute_unit_price,
        };
        Ok(instructions::set_fees(self.harness, base_fee, compute_unit_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AnchorDeserialize;

    fn resolver() -> ConfigResolver {
        ConfigResolver::new(Pubkey::new_unique(), MockCoordinatorSettings::default())
    }

    #[test]
    fn cluster_names_parse() {
        assert_eq!("devnet".parse::<Cluster>().unwrap(), Cluster::Devnet);
        assert_eq!("mainnet-beta".parse::<Cluster>().unwrap(), Cluster::Mainnet);
        assert_eq!("localhost".parse::<Cluster>().unwrap(), Cluster::Localnet);
        assert!(matches!(
            "testnet".parse::<Cluster>(),
            Err(ClientError::UnknownCluster(name)) if name == "testnet"
        ));
        for cluster in [Cluster::Mainnet, Cluster::Devnet, Cluster::Localnet] {
            assert_eq!(cluster.to_string().parse::<Cluster>().unwrap(), cluster);
        }
    }

    #[test]
    fn devnet_comes_from_the_table() {
        let mut resolver = resolver();
        let params = resolver.resolve(Cluster::Devnet);
        assert_eq!(params.entry_fee, 10_000_000);
        assert_eq!(params.interval, 30);
        assert_eq!(params.coordinator_config, DEVNET_COORDINATOR);
        assert_eq!(params.subscription_id, Some(1));
        assert!(resolver.take_provisioning().is_empty());
        assert_eq!(resolver.local_coordinator(), None);
    }

    #[test]
    fn mainnet_needs_a_subscription_before_initializing() {
        let mut resolver = resolver();
        let params = resolver.resolve(Cluster::Mainnet);
        assert!(matches!(
            params.initialize_params(),
            Err(ClientError::MissingSubscription)
        ));
    }

    #[test]
    fn localnet_provisions_the_stand_in_once() {
        let harness = Pubkey::new_unique();
        let mut resolver = ConfigResolver::new(harness, MockCoordinatorSettings::default());

        let first = resolver.resolve(Cluster::Localnet);
        let second = resolver.resolve(Cluster::Localnet);
        assert_eq!(first, second);
        assert_eq!(first.coordinator_config, coordinator_address(&harness).0);
        assert_eq!(first.subscription_id, None);

        let provisioning = resolver.take_provisioning();
        assert_eq!(provisioning.len(), 1);
        assert_eq!(provisioning[0].program_id, vrf_coordinator::ID);
        let args = vrf_coordinator::instruction::InitializeCoordinator::try_from_slice(
            &provisioning[0].data[8..],
        )
        .unwrap();
        assert!(args.allow_override);
        assert!(resolver.take_provisioning().is_empty());

        resolver.resolve(Cluster::Localnet);
        assert!(resolver.take_provisioning().is_empty());
    }

    #[test]
    fn mock_fees_are_adjustable_after_provisioning() {
        let mut resolver = resolver();
        assert!(matches!(
            resolver.set_mock_fees(1, 2),
            Err(ClientError::LocalCoordinatorMissing)
        ));

        resolver.resolve(Cluster::Localnet);
        let ix = resolver.set_mock_fees(1, 2).unwrap();
        assert_eq!(ix.program_id, vrf_coordinator::ID);
        assert_eq!(
            resolver.mock(),
            MockCoordinatorSettings {
                base_fee: 1,
                compute_unit_price: 2,
            }
        );
    }

    #[test]
    fn initialize_params_carry_the_subscription() {
        let mut resolver = resolver();
        let params = resolver.resolve(Cluster::Devnet).initialize_params().unwrap();
        assert_eq!(params.subscription_id, 1);
        assert_eq!(params.key_hash, DEVNET_KEY_HASH);
        assert_eq!(params.minimum_confirmations, 3);
    }
}
