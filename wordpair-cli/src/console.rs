use wordpair_core::GameEventHandler;
use wordpair_types::{EndGameRule, GameEvent, GameOutcome, Team, TeamIndex};

/// Renders game events as console lines.
#[derive(Debug, Default)]
pub struct ConsoleView {
    teams: Vec<Team>,
    target_reached_by: Option<TeamIndex>,
    end_game_rule: EndGameRule,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(end_game_rule: EndGameRule) -> Self {
        Self {
            end_game_rule,
            ..Self::default()
        }
    }

    /// Who still plays once `crosser` has reached the target.
    fn remaining_turns_hint(&self, crosser: TeamIndex) -> &'static str {
        if crosser + 1 >= self.teams.len() {
            return "The game ends after this turn.";
        }
        match self.end_game_rule {
            EndGameRule::CompleteRotation => "The teams after them in this rotation get one more turn.",
            EndGameRule::FullLap => "Every other team gets one more turn.",
        }
    }

    fn team_name(&self, index: TeamIndex) -> &str {
        self.teams
            .get(index)
            .map(|team| team.name.as_str())
            .unwrap_or("?")
    }

    /// Text for an event, or `None` when the event is not worth a line.
    pub fn describe(&mut self, event: &GameEvent) -> Option<String> {
        let line = match event {
            GameEvent::GameInit {
                teams,
                round_time_seconds,
                target_score,
                ..
            } => {
                self.teams = teams.clone();
                self.target_reached_by = None;
                let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
                format!(
                    "New game: {} | {}s rounds | first to {} points. {} starts, type `start`.",
                    names.join(", "),
                    round_time_seconds,
                    target_score,
                    self.team_name(0)
                )
            }
            GameEvent::RoundStart {
                team_index,
                time_left,
            } => format!("Go {}! {}s on the clock.", self.team_name(*team_index), time_left),
            GameEvent::TimerTick { time_left, .. } => {
                if *time_left == 0 || (*time_left > 5 && time_left % 10 != 0) {
                    return None;
                }
                format!("  {}s left", time_left)
            }
            GameEvent::RoundEnd { team_index } => {
                format!("Round over for {}. Type `next`.", self.team_name(*team_index))
            }
            GameEvent::NextTeam { team_index } => {
                let name = self.team_name(*team_index);
                match self.target_reached_by {
                    Some(crosser) if crosser != *team_index => {
                        format!("Last chance for {}! Type `start`.", name)
                    }
                    _ => format!("Next up: {}. Type `start`.", name),
                }
            }
            GameEvent::ScoreChange {
                team_index,
                points,
                new_score,
            } => format!(
                "  {} {:+} -> {}",
                self.team_name(*team_index),
                points,
                new_score
            ),
            GameEvent::WordChange { word_pair } => format!(
                "  Word: {}   (compound: {})",
                word_pair.simple, word_pair.compound
            ),
            GameEvent::TargetScoreReached { team_index, score } => {
                self.target_reached_by = Some(*team_index);
                format!(
                    "{} reached {} points! {}",
                    self.team_name(*team_index),
                    score,
                    self.remaining_turns_hint(*team_index)
                )
            }
            GameEvent::GameEnd(outcome) => self.describe_outcome(outcome),
            GameEvent::GameReset => {
                self.target_reached_by = None;
                "Game reset. Scores are back to zero.".to_string()
            }
        };
        Some(line)
    }

    fn describe_outcome(&self, outcome: &GameOutcome) -> String {
        let best = outcome
            .winner_indices
            .first()
            .and_then(|index| outcome.final_scores.get(*index))
            .copied()
            .unwrap_or(0);
        let names: Vec<&str> = outcome
            .winner_indices
            .iter()
            .map(|index| self.team_name(*index))
            .collect();

        if outcome.is_tie {
            format!("Game over! Tie between {} with {} points.", names.join(" and "), best)
        } else {
            format!("Game over! {} wins with {} points.", names.join(""), best)
        }
    }
}

impl GameEventHandler for ConsoleView {
    fn handle_event(&mut self, event: &GameEvent) {
        if let Some(line) = self.describe(event) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use wordpair_types::WordPair;

    fn view_with_teams() -> ConsoleView {
        let mut view = ConsoleView::new();
        view.describe(&GameEvent::GameInit {
            game_id: Uuid::new_v4(),
            teams: vec![Team::new("Owls", "#e6194B"), Team::new("Foxes", "#3cb44b")],
            round_time_seconds: 60,
            target_score: 20,
        });
        view
    }

    #[test]
    fn test_score_and_word_lines() {
        let mut view = view_with_teams();
        assert_eq!(
            view.describe(&GameEvent::ScoreChange {
                team_index: 1,
                points: -1,
                new_score: 4
            }),
            Some("  Foxes -1 -> 4".to_string())
        );
        assert_eq!(
            view.describe(&GameEvent::WordChange {
                word_pair: WordPair::new("Baum", "Apfelbaum")
            }),
            Some("  Word: Baum   (compound: Apfelbaum)".to_string())
        );
    }

    #[test]
    fn test_quiet_ticks() {
        let mut view = view_with_teams();
        let tick = |time_left| GameEvent::TimerTick {
            team_index: 0,
            time_left,
            fraction: 0.5,
        };
        assert_eq!(view.describe(&tick(37)), None);
        assert_eq!(view.describe(&tick(30)), Some("  30s left".to_string()));
        assert_eq!(view.describe(&tick(3)), Some("  3s left".to_string()));
        assert_eq!(view.describe(&tick(0)), None);
    }

    #[test]
    fn test_last_chance_hint() {
        let mut view = view_with_teams();
        view.describe(&GameEvent::TargetScoreReached {
            team_index: 0,
            score: 21,
        });
        assert_eq!(
            view.describe(&GameEvent::NextTeam { team_index: 1 }),
            Some("Last chance for Foxes! Type `start`.".to_string())
        );
    }

    #[test]
    fn test_target_hint_follows_end_game_rule() {
        let init = GameEvent::GameInit {
            game_id: Uuid::new_v4(),
            teams: vec![
                Team::new("Owls", "#e6194B"),
                Team::new("Foxes", "#3cb44b"),
                Team::new("Bears", "#4363d8"),
            ],
            round_time_seconds: 60,
            target_score: 20,
        };
        let reached = |team_index| GameEvent::TargetScoreReached {
            team_index,
            score: 20,
        };

        let mut rotation = ConsoleView::with_rule(EndGameRule::CompleteRotation);
        rotation.describe(&init);
        assert_eq!(
            rotation.describe(&reached(1)),
            Some("Foxes reached 20 points! The teams after them in this rotation get one more turn.".to_string())
        );
        assert_eq!(
            rotation.describe(&reached(2)),
            Some("Bears reached 20 points! The game ends after this turn.".to_string())
        );

        let mut lap = ConsoleView::with_rule(EndGameRule::FullLap);
        lap.describe(&init);
        assert_eq!(
            lap.describe(&reached(1)),
            Some("Foxes reached 20 points! Every other team gets one more turn.".to_string())
        );
    }

    #[test]
    fn test_outcome_lines() {
        let mut view = view_with_teams();
        let tie = GameEvent::GameEnd(GameOutcome {
            winner_indices: vec![0, 1],
            is_tie: true,
            final_scores: vec![22, 22],
        });
        assert_eq!(
            view.describe(&tie),
            Some("Game over! Tie between Owls and Foxes with 22 points.".to_string())
        );
    }
}
