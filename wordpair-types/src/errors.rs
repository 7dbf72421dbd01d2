use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Rejected operations. Returning one of these never mutates game state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("at least 2 teams are required, got {count}")]
    TooFewTeams { count: usize },
    #[error("at most 8 teams are supported, got {count}")]
    TooManyTeams { count: usize },
    #[error("invalid game configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("no game has been initialized")]
    NotInitialized,
    #[error("the game is already over")]
    GameAlreadyCompleted,
    #[error("a round is already active")]
    RoundAlreadyActive,
    #[error("no round is active")]
    RoundNotActive,
    #[error("the finished round must be advanced to the next team first")]
    AwaitingNextTeam,
}
