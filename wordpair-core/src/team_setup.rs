use wordpair_types::{GameError, MAX_TEAMS, MIN_TEAMS, Team};

/// The eight most distinguishable team colors, assigned in order.
pub const TEAM_COLORS: [&str; MAX_TEAMS] = [
    "#e6194B", // Red
    "#3cb44b", // Green
    "#4363d8", // Blue
    "#f58231", // Orange
    "#911eb4", // Purple
    "#42d4f4", // Turquoise
    "#f032e6", // Magenta
    "#f3c300", // Yellow
];

/// Builds `count` teams named `Team 1`, `Team 2`, ...
pub fn default_teams(count: usize) -> Result<Vec<Team>, GameError> {
    let names: Vec<String> = (1..=count).map(|i| format!("Team {}", i)).collect();
    build_teams(&names)
}

/// Builds teams from the given names. Blank names fall back to `Team N`.
pub fn build_teams<S: AsRef<str>>(names: &[S]) -> Result<Vec<Team>, GameError> {
    if names.len() < MIN_TEAMS {
        return Err(GameError::TooFewTeams { count: names.len() });
    }
    if names.len() > MAX_TEAMS {
        return Err(GameError::TooManyTeams { count: names.len() });
    }

    let teams = names
        .iter()
        .zip(TEAM_COLORS)
        .enumerate()
        .map(|(index, (name, color))| {
            let name = name.as_ref().trim();
            if name.is_empty() {
                Team::new(format!("Team {}", index + 1), color)
            } else {
                Team::new(name, color)
            }
        })
        .collect();

    Ok(teams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_teams() {
        let teams = default_teams(3).unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].name, "Team 1");
        assert_eq!(teams[2].name, "Team 3");
        assert_eq!(teams[1].color, "#3cb44b");
        assert!(teams.iter().all(|t| t.score == 0));
    }

    #[test]
    fn test_team_count_bounds() {
        assert_eq!(default_teams(1), Err(GameError::TooFewTeams { count: 1 }));
        assert_eq!(default_teams(9), Err(GameError::TooManyTeams { count: 9 }));
        assert!(default_teams(2).is_ok());
        assert!(default_teams(8).is_ok());
    }

    #[test]
    fn test_blank_names_fall_back() {
        let teams = build_teams(&["Owls", "  ", "Foxes"]).unwrap();
        assert_eq!(teams[0].name, "Owls");
        assert_eq!(teams[1].name, "Team 2");
        assert_eq!(teams[2].name, "Foxes");
    }

    #[test]
    fn test_colors_are_distinct() {
        let teams = default_teams(MAX_TEAMS).unwrap();
        let mut colors: Vec<&str> = teams.iter().map(|t| t.color.as_str()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), MAX_TEAMS);
    }
}
