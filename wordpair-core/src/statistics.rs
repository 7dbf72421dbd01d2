use crate::{Game, GameEventHandler, ScoringEngine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Write;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use wordpair_types::{GameEvent, GameId, GameOutcome, ScoreAction, Team, TeamIndex, WordPair};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub simple: u32,
    pub compound: u32,
    pub skipped: u32,
}

impl ActionCounts {
    fn record(&mut self, action: ScoreAction) {
        match action {
            ScoreAction::Simple => self.simple += 1,
            ScoreAction::Compound => self.compound += 1,
            ScoreAction::Skip => self.skipped += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.simple + self.compound + self.skipped
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub teams: Vec<Team>,
    pub round_time_seconds: u32,
    pub target_score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word_pair: WordPair,
    pub action: ScoreAction,
    pub points: i32,
    pub seconds_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub team_index: TeamIndex,
    pub team_name: String,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub words: Vec<WordRecord>,
    pub points_earned: i32,
    pub actions: ActionCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round_number: u32,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_index: TeamIndex,
    pub team_name: String,
    pub color: String,
    pub total_score: i32,
    pub round_scores: Vec<RoundScore>,
    pub actions: ActionCounts,
    pub total_words: u32,
    pub total_seconds: f64,
    pub average_seconds_per_word: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedWord {
    pub word_pair: WordPair,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub total_words_played: u32,
    pub actions: ActionCounts,
    pub most_skipped: Vec<SkippedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub started_at: DateTime<Utc>,
    pub settings: GameSettings,
    pub rounds: Vec<RoundRecord>,
    pub team_stats: Vec<TeamStats>,
    pub word_stats: WordStats,
    pub duration_seconds: f64,
    pub outcome: Option<GameOutcome>,
}

impl GameRecord {
    fn new(game_id: GameId, settings: GameSettings) -> Self {
        let team_stats = settings
            .teams
            .iter()
            .enumerate()
            .map(|(team_index, team)| TeamStats {
                team_index,
                team_name: team.name.clone(),
                color: team.color.clone(),
                total_score: team.score,
                round_scores: Vec::new(),
                actions: ActionCounts::default(),
                total_words: 0,
                total_seconds: 0.0,
                average_seconds_per_word: 0.0,
            })
            .collect();

        Self {
            game_id,
            started_at: Utc::now(),
            settings,
            rounds: Vec::new(),
            team_stats,
            word_stats: WordStats::default(),
            duration_seconds: 0.0,
            outcome: None,
        }
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds.len()
    }
}

/// Post-game report builder. Listens to game events only and never
/// influences the game it observes.
pub struct GameStatistics {
    current: Option<GameRecord>,
    current_round: Option<RoundRecord>,
    shown_word: Option<WordPair>,
    last_action_at: Option<DateTime<Utc>>,
    history: VecDeque<GameRecord>,
    history_limit: usize,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(history_limit: usize) -> Self {
        Self {
            current: None,
            current_round: None,
            shown_word: None,
            last_action_at: None,
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
        }
    }

    /// Subscribe to every event of `game` and hand back a shared handle.
    pub fn attach(self, game: &mut Game) -> Arc<Mutex<GameStatistics>> {
        let shared = Arc::new(Mutex::new(self));
        let observer = shared.clone();
        game.subscribe_all(move |event| match observer.lock() {
            Ok(mut stats) => stats.handle_event(event),
            Err(_) => warn!("Statistics lock poisoned, dropping event"),
        });
        shared
    }

    pub fn is_tracking(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&GameRecord> {
        self.current.as_ref()
    }

    /// Finished games, oldest first.
    pub fn history(&self) -> &VecDeque<GameRecord> {
        &self.history
    }

    pub fn last_game(&self) -> Option<&GameRecord> {
        self.history.back()
    }

    fn start_tracking(&mut self, game_id: GameId, settings: GameSettings) {
        info!(%game_id, "Statistics tracking started");
        self.current = Some(GameRecord::new(game_id, settings));
        self.current_round = None;
        self.shown_word = None;
        self.last_action_at = None;
    }

    fn start_round(&mut self, team_index: TeamIndex) {
        let Some(game) = self.current.as_ref() else {
            return;
        };
        let team_name = game
            .settings
            .teams
            .get(team_index)
            .map(|team| team.name.clone())
            .unwrap_or_default();
        let now = Utc::now();

        self.current_round = Some(RoundRecord {
            round_number: game.rounds.len() as u32 + 1,
            team_index,
            team_name,
            started_at: now,
            duration_seconds: 0.0,
            words: Vec::new(),
            points_earned: 0,
            actions: ActionCounts::default(),
        });
        self.last_action_at = Some(now);
    }

    fn record_word_action(&mut self, team_index: TeamIndex, points: i32) {
        let (Some(game), Some(round)) = (self.current.as_mut(), self.current_round.as_mut()) else {
            warn!("Cannot record word action without an open round");
            return;
        };
        let Some(word_pair) = self.shown_word.clone() else {
            return;
        };

        let now = Utc::now();
        let seconds_used = self
            .last_action_at
            .map(|at| seconds_between(at, now))
            .unwrap_or(0.0);
        self.last_action_at = Some(now);

        let action = ScoreAction::from_points(points);
        debug!(%word_pair, action = action.label(), points, "Recording word action");

        round.words.push(WordRecord {
            word_pair: word_pair.clone(),
            action,
            points,
            seconds_used,
        });
        round.points_earned += points;
        round.actions.record(action);

        if let Some(team) = game.team_stats.get_mut(team_index) {
            team.actions.record(action);
            team.total_words += 1;
            team.total_score += points;
        }

        game.word_stats.total_words_played += 1;
        game.word_stats.actions.record(action);

        if action == ScoreAction::Skip {
            let skipped = &mut game.word_stats.most_skipped;
            match skipped.iter_mut().find(|s| s.word_pair == word_pair) {
                Some(entry) => entry.count += 1,
                None => skipped.push(SkippedWord {
                    word_pair,
                    count: 1,
                }),
            }
        }
    }

    fn end_round(&mut self) {
        let (Some(game), Some(mut round)) = (self.current.as_mut(), self.current_round.take()) else {
            return;
        };

        round.duration_seconds = seconds_between(round.started_at, Utc::now());
        let round_seconds: f64 = round.words.iter().map(|w| w.seconds_used).sum();

        if let Some(team) = game.team_stats.get_mut(round.team_index) {
            team.round_scores.push(RoundScore {
                round_number: round.round_number,
                score: round.points_earned,
            });
            team.total_seconds += round_seconds;
            if team.total_words > 0 {
                team.average_seconds_per_word = team.total_seconds / team.total_words as f64;
            }
        }

        debug!(
            round = round.round_number,
            team_index = round.team_index,
            points = round.points_earned,
            "Round recorded"
        );
        game.rounds.push(round);
    }

    fn end_game(&mut self, outcome: &GameOutcome) {
        if self.current_round.is_some() {
            self.end_round();
        }
        let Some(mut game) = self.current.take() else {
            return;
        };

        // The game's own scores are the source of truth
        for (team, score) in game.team_stats.iter_mut().zip(&outcome.final_scores) {
            team.total_score = *score;
        }
        game.word_stats
            .most_skipped
            .sort_by(|a, b| b.count.cmp(&a.count));
        game.duration_seconds = seconds_between(game.started_at, Utc::now());
        game.outcome = Some(outcome.clone());

        info!(game_id = %game.game_id, rounds = game.rounds.len(), "Statistics tracking completed");
        self.history.push_back(game);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        self.shown_word = None;
        self.last_action_at = None;
    }

    /// A reset replays the same game. After game over the open record is
    /// gone, so the settings come from the game just finished.
    fn restart(&mut self) {
        let (game_id, mut settings) = match self.current.take() {
            Some(game) => (game.game_id, game.settings),
            None => match self.history.back() {
                Some(last) => (last.game_id, last.settings.clone()),
                None => return,
            },
        };
        for team in &mut settings.teams {
            team.score = 0;
        }
        self.start_tracking(game_id, settings);
    }
}

impl Default for GameStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEventHandler for GameStatistics {
    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameInit {
                game_id,
                teams,
                round_time_seconds,
                target_score,
            } => self.start_tracking(
                *game_id,
                GameSettings {
                    teams: teams.clone(),
                    round_time_seconds: *round_time_seconds,
                    target_score: *target_score,
                },
            ),
            GameEvent::RoundStart { team_index, .. } => self.start_round(*team_index),
            GameEvent::WordChange { word_pair } => self.shown_word = Some(word_pair.clone()),
            GameEvent::ScoreChange {
                team_index, points, ..
            } => self.record_word_action(*team_index, *points),
            GameEvent::RoundEnd { .. } => self.end_round(),
            GameEvent::GameEnd(outcome) => self.end_game(outcome),
            GameEvent::GameReset => self.restart(),
            GameEvent::TimerTick { .. }
            | GameEvent::NextTeam { .. }
            | GameEvent::TargetScoreReached { .. } => {}
        }
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds().max(0) as f64 / 1000.0
}

fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Plain-text report of a finished (or running) game.
pub fn text_summary(record: &GameRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "GAME STATISTICS");
    let _ = writeln!(out, "Played on {}", record.started_at.format("%Y-%m-%d"));
    let _ = writeln!(out);
    let _ = writeln!(out, "RESULT:");

    let teams: Vec<Team> = record
        .team_stats
        .iter()
        .map(|stats| Team {
            name: stats.team_name.clone(),
            score: stats.total_score,
            color: stats.color.clone(),
        })
        .collect();
    for (rank, (index, score)) in ScoringEngine::standings(&teams).into_iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {} points", rank + 1, teams[index].name, score);
    }

    let actions = &record.word_stats.actions;
    let _ = writeln!(out);
    let _ = writeln!(out, "DETAILS:");
    let _ = writeln!(out, "- Duration: {}", format_duration(record.duration_seconds));
    let _ = writeln!(out, "- {} rounds played", record.rounds_played());
    let _ = writeln!(out, "- {} words in total", actions.total());
    let _ = writeln!(out, "- {} simple words", actions.simple);
    let _ = writeln!(out, "- {} compound words", actions.compound);
    let _ = write!(out, "- {} skipped words", actions.skipped);
    out
}
