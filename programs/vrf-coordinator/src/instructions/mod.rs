pub use create_subscription::*;
pub use fulfill_random_words::*;
pub use fund_subscription::*;
pub use initialize_coordinator::*;
pub use manage_consumer::*;
pub use request_random_words::*;
pub use set_fees::*;

pub mod create_subscription;
pub mod fulfill_random_words;
pub mod fund_subscription;
pub mod initialize_coordinator;
pub mod manage_consumer;
pub mod request_random_words;
pub mod set_fees;
