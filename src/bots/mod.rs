pub mod aggressive;
pub mod first_legal;
pub mod human;
pub mod random;
pub mod registry;

pub use aggressive::AggressiveBot;
pub use first_legal::FirstLegalBot;
pub use human::HumanBot;
pub use random::RandomBot;
pub use registry::{create_bot, create_bot_from_spec, label_for_spec};
