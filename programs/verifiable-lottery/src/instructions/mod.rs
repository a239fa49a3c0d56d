pub use check_upkeep::*;
pub use enter::*;
pub use fulfill_random_words::*;
pub use initialize::*;
pub use perform_upkeep::*;

pub mod check_upkeep;
pub mod enter;
pub mod fulfill_random_words;
pub mod initialize;
pub mod perform_upkeep;
