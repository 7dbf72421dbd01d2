use std::str::FromStr;
use thiserror::Error;
use wordpair_types::ScoreAction;

pub const HELP: &str = "\
Commands:
  start              start the current team's round
  point | +1         simple word guessed
  compound | +3      compound word guessed
  skip | -1          skip the word
  next               end the round and hand over to the next team
  reset              back to the first team with zero scores
  new                start a new game with the configured teams
  scores             show the scoreboard
  stats              show statistics of the last game
  export             print the last game's statistics as JSON
  help               show this list
  quit               leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Score(ScoreAction),
    Next,
    Reset,
    NewGame,
    Scores,
    Stats,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        line.parse()
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.split_whitespace().next().ok_or(CommandError::Empty)?;
        let command = match word.to_lowercase().as_str() {
            "start" | "s" => Command::Start,
            "point" | "+1" | "p" => Command::Score(ScoreAction::Simple),
            "compound" | "+3" | "c" => Command::Score(ScoreAction::Compound),
            "skip" | "-1" | "x" => Command::Score(ScoreAction::Skip),
            "next" | "n" => Command::Next,
            "reset" => Command::Reset,
            "new" => Command::NewGame,
            "scores" => Command::Scores,
            "stats" => Command::Stats,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_aliases() {
        assert_eq!(Command::parse("+1"), Ok(Command::Score(ScoreAction::Simple)));
        assert_eq!(Command::parse("compound"), Ok(Command::Score(ScoreAction::Compound)));
        assert_eq!(Command::parse("  SKIP  "), Ok(Command::Score(ScoreAction::Skip)));
    }

    #[test]
    fn test_trailing_words_ignored() {
        assert_eq!(Command::parse("next please"), Ok(Command::Next));
    }

    #[test]
    fn test_rejects_unknown_and_empty() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
