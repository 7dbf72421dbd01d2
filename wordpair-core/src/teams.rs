use wordpair_types::{Team, TeamIndex};

/// Ordered teams of the running game. Turn order is registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl TeamRegistry {
    /// Copies the given teams with every score reset to zero.
    pub fn new(teams: &[Team]) -> Self {
        let teams = teams
            .iter()
            .map(|team| Team {
                score: 0,
                ..team.clone()
            })
            .collect();
        Self { teams }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get(&self, index: TeamIndex) -> Option<&Team> {
        self.teams.get(index)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn scores(&self) -> Vec<i32> {
        self.teams.iter().map(|team| team.score).collect()
    }

    /// Applies a point delta and returns the new score. Scores may go negative;
    /// they saturate at the `i32` bounds instead of overflowing.
    pub fn add_points(&mut self, index: TeamIndex, points: i32) -> Option<i32> {
        let team = self.teams.get_mut(index)?;
        team.score = team.score.saturating_add(points);
        Some(team.score)
    }

    pub fn reset_scores(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
    }

    pub fn next_index(&self, current: TeamIndex) -> TeamIndex {
        if self.teams.is_empty() {
            return 0;
        }
        (current + 1) % self.teams.len()
    }

    pub fn last_index(&self) -> Option<TeamIndex> {
        self.teams.len().checked_sub(1)
    }
}
