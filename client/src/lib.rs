//! Off-chain side of the verifiable lottery: per-cluster parameters,
//! subscription bootstrap and instruction builders for both programs.

pub mod bootstrap;
pub mod error;
pub mod instructions;
pub mod network;

pub use bootstrap::{plan_bootstrap, BootstrapPlan};
pub use error::ClientError;
pub use network::{Cluster, ConfigResolver, MockCoordinatorSettings, NetworkParameters};
