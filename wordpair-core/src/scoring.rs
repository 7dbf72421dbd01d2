use wordpair_types::{EndGameRule, GameOutcome, Team, TeamIndex};

pub struct ScoringEngine;

impl ScoringEngine {
    /// True iff any team has reached the target score
    pub fn target_reached(teams: &[Team], target_score: i32) -> bool {
        teams.iter().any(|team| team.score >= target_score)
    }

    /// Decide whether the game ends after `current` finishes its turn.
    ///
    /// The game never ends before some team has reached the target.
    pub fn should_end_game(
        rule: EndGameRule,
        target_reached_by: Option<TeamIndex>,
        current: TeamIndex,
        team_count: usize,
    ) -> bool {
        let Some(crosser) = target_reached_by else {
            return false;
        };
        if team_count == 0 {
            return true;
        }
        let last = team_count - 1;

        match rule {
            EndGameRule::CompleteRotation => current == last,
            EndGameRule::FullLap => {
                if crosser == last && current == last {
                    return true;
                }
                (current + 1) % team_count == crosser
            }
        }
    }

    /// All teams sharing the highest score win, in registry order
    pub fn determine_winners(teams: &[Team]) -> GameOutcome {
        let final_scores: Vec<i32> = teams.iter().map(|team| team.score).collect();
        let winner_indices: Vec<TeamIndex> = match final_scores.iter().max() {
            Some(&best) => final_scores
                .iter()
                .enumerate()
                .filter(|(_, score)| **score == best)
                .map(|(index, _)| index)
                .collect(),
            None => Vec::new(),
        };

        GameOutcome {
            is_tie: winner_indices.len() > 1,
            winner_indices,
            final_scores,
        }
    }

    /// Team indices ordered by score, highest first. Equal scores keep registry order.
    pub fn standings(teams: &[Team]) -> Vec<(TeamIndex, i32)> {
        let mut standings: Vec<(TeamIndex, i32)> = teams
            .iter()
            .enumerate()
            .map(|(index, team)| (index, team.score))
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        standings
    }
}
