mod card;
mod deck;
mod match_settings;
mod match_state;

pub use card::*;
pub use deck::*;
pub use match_settings::*;
pub use match_state::*;
