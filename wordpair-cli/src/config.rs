use std::env;
use std::path::PathBuf;
use thiserror::Error;
use wordpair_core::{DEFAULT_HISTORY_LIMIT, DEFAULT_LIST_PROBABILITY, build_teams, default_teams};
use wordpair_types::{
    DEFAULT_ROUND_TIME_SECONDS, DEFAULT_TARGET_SCORE, EndGameRule, GameConfig, GameError, Team,
};

const DEFAULT_TEAM_COUNT: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid team setup: {0}")]
    Teams(#[from] GameError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub teams: Vec<Team>,
    pub round_time_seconds: u32,
    pub target_score: i32,
    pub end_game_rule: EndGameRule,
    pub words_file: Option<PathBuf>,
    pub custom_words_file: Option<PathBuf>,
    pub default_word_probability: u8,
    pub stats_history_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let teams = match get("TEAM_NAMES") {
            Some(names) => {
                let names: Vec<&str> = names.split(',').collect();
                build_teams(&names)?
            }
            None => default_teams(parse_or(&get, "TEAM_COUNT", DEFAULT_TEAM_COUNT)?)?,
        };

        let end_game_rule = match get("END_GAME_RULE") {
            Some(value) => parse_rule(&value)?,
            None => EndGameRule::default(),
        };

        let default_word_probability =
            parse_or(&get, "DEFAULT_WORD_PROBABILITY", DEFAULT_LIST_PROBABILITY)?;
        if default_word_probability > 100 {
            return Err(ConfigError::InvalidValue {
                key: "DEFAULT_WORD_PROBABILITY",
                value: default_word_probability.to_string(),
            });
        }

        Ok(Self {
            teams,
            round_time_seconds: parse_or(&get, "ROUND_TIME_SECONDS", DEFAULT_ROUND_TIME_SECONDS)?,
            target_score: parse_or(&get, "TARGET_SCORE", DEFAULT_TARGET_SCORE)?,
            end_game_rule,
            words_file: get("WORDS_FILE").map(PathBuf::from),
            custom_words_file: get("CUSTOM_WORDS_FILE").map(PathBuf::from),
            default_word_probability,
            stats_history_limit: parse_or(&get, "STATS_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?,
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.teams.clone(), self.round_time_seconds, self.target_score)
            .with_end_game_rule(self.end_game_rule)
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

fn parse_rule(value: &str) -> Result<EndGameRule, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "rotation" | "complete-rotation" => Ok(EndGameRule::CompleteRotation),
        "lap" | "full-lap" => Ok(EndGameRule::FullLap),
        _ => Err(ConfigError::InvalidValue {
            key: "END_GAME_RULE",
            value: value.to_string(),
        }),
    }
}
