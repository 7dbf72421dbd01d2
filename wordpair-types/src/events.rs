use crate::{GameId, GameOutcome, Team, TeamIndex, WordPair};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Subscription key for the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EventKind {
    GameInit,
    RoundStart,
    TimerTick,
    RoundEnd,
    NextTeam,
    ScoreChange,
    WordChange,
    TargetScoreReached,
    GameEnd,
    GameReset,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::GameInit,
        EventKind::RoundStart,
        EventKind::TimerTick,
        EventKind::RoundEnd,
        EventKind::NextTeam,
        EventKind::ScoreChange,
        EventKind::WordChange,
        EventKind::TargetScoreReached,
        EventKind::GameEnd,
        EventKind::GameReset,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::GameInit => "gameInit",
            EventKind::RoundStart => "roundStart",
            EventKind::TimerTick => "timerTick",
            EventKind::RoundEnd => "roundEnd",
            EventKind::NextTeam => "nextTeam",
            EventKind::ScoreChange => "scoreChange",
            EventKind::WordChange => "wordChange",
            EventKind::TargetScoreReached => "targetScoreReached",
            EventKind::GameEnd => "gameEnd",
            EventKind::GameReset => "gameReset",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameEvent {
    GameInit {
        game_id: GameId,
        teams: Vec<Team>,
        round_time_seconds: u32,
        target_score: i32,
    },
    RoundStart {
        team_index: TeamIndex,
        time_left: u32,
    },
    TimerTick {
        team_index: TeamIndex,
        time_left: u32,
        fraction: f32, // Remaining share of the round, 1.0 to 0.0
    },
    RoundEnd {
        team_index: TeamIndex,
    },
    NextTeam {
        team_index: TeamIndex,
    },
    ScoreChange {
        team_index: TeamIndex,
        points: i32,
        new_score: i32,
    },
    WordChange {
        word_pair: WordPair,
    },
    TargetScoreReached {
        team_index: TeamIndex,
        score: i32,
    },
    GameEnd(GameOutcome),
    GameReset,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameInit { .. } => EventKind::GameInit,
            GameEvent::RoundStart { .. } => EventKind::RoundStart,
            GameEvent::TimerTick { .. } => EventKind::TimerTick,
            GameEvent::RoundEnd { .. } => EventKind::RoundEnd,
            GameEvent::NextTeam { .. } => EventKind::NextTeam,
            GameEvent::ScoreChange { .. } => EventKind::ScoreChange,
            GameEvent::WordChange { .. } => EventKind::WordChange,
            GameEvent::TargetScoreReached { .. } => EventKind::TargetScoreReached,
            GameEvent::GameEnd(_) => EventKind::GameEnd,
            GameEvent::GameReset => EventKind::GameReset,
        }
    }
}
