pub mod game;
pub mod events;
pub mod team;
pub mod errors;

// Re-export all types
pub use game::*;
pub use events::*;
pub use team::*;
pub use errors::*;
