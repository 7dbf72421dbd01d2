use crate::{GameError, Team};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

pub type GameId = Uuid;
pub type TeamIndex = usize;

pub const DEFAULT_ROUND_TIME_SECONDS: u32 = 60;
pub const DEFAULT_TARGET_SCORE: i32 = 20;
pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 8;

/// A simple word and the compound word the describer has to get across.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WordPair {
    pub simple: String,
    pub compound: String,
}

impl WordPair {
    pub fn new(simple: impl Into<String>, compound: impl Into<String>) -> Self {
        Self {
            simple: simple.into(),
            compound: compound.into(),
        }
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.simple, self.compound)
    }
}

/// When the game stops once some team has reached the target score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EndGameRule {
    /// End after the last team in the turn order finishes its turn.
    #[default]
    CompleteRotation,
    /// End once every team has had one more turn after the team that first
    /// reached the target; ends at once if that team is last in the order.
    FullLap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameConfig {
    pub teams: Vec<Team>,
    pub round_time_seconds: u32,
    pub target_score: i32,
    pub end_game_rule: EndGameRule,
}

impl GameConfig {
    pub fn new(teams: Vec<Team>, round_time_seconds: u32, target_score: i32) -> Self {
        Self {
            teams,
            round_time_seconds,
            target_score,
            end_game_rule: EndGameRule::default(),
        }
    }

    pub fn with_end_game_rule(mut self, rule: EndGameRule) -> Self {
        self.end_game_rule = rule;
        self
    }

    /// Checks the preconditions the state machine relies on, including the
    /// 2..=8 team bounds that team setup also enforces.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.teams.len() < MIN_TEAMS {
            return Err(GameError::TooFewTeams {
                count: self.teams.len(),
            });
        }
        if self.teams.len() > MAX_TEAMS {
            return Err(GameError::TooManyTeams {
                count: self.teams.len(),
            });
        }
        if self.round_time_seconds == 0 {
            return Err(GameError::InvalidConfig {
                reason: "round time must be greater than zero".to_string(),
            });
        }
        if self.target_score <= 0 {
            return Err(GameError::InvalidConfig {
                reason: "target score must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundPhase {
    Idle,               // No game initialized yet
    AwaitingRoundStart, // Current team may start its turn
    RoundActive,        // Timer running, words being described
    RoundEnded,         // Turn over, waiting for the explicit advance
    GameOver,
}

/// The three scoring buttons of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ScoreAction {
    Simple,
    Compound,
    Skip,
}

impl ScoreAction {
    pub fn points(self) -> i32 {
        match self {
            ScoreAction::Simple => 1,
            ScoreAction::Compound => 3,
            ScoreAction::Skip => -1,
        }
    }

    /// Classifies an arbitrary point delta.
    pub fn from_points(points: i32) -> Self {
        match points {
            3 => ScoreAction::Compound,
            p if p < 0 => ScoreAction::Skip,
            _ => ScoreAction::Simple,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreAction::Simple => "simple",
            ScoreAction::Compound => "compound",
            ScoreAction::Skip => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameOutcome {
    pub winner_indices: Vec<TeamIndex>,
    pub is_tie: bool,
    pub final_scores: Vec<i32>,
}
