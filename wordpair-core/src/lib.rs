pub mod game_events;
pub mod game_state;
pub mod scoring;
pub mod statistics;
pub mod team_setup;
pub mod teams;
pub mod timer;
pub mod word_selection;
pub mod word_supply;

// Re-export main components
pub use game_events::*;
pub use game_state::*;
pub use scoring::*;
pub use statistics::*;
pub use team_setup::*;
pub use teams::*;
pub use timer::*;
pub use word_selection::*;
pub use word_supply::*;
