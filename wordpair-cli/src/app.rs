use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::console::ConsoleView;
use crate::ticker::{IntervalTicker, interval_for, next_tick};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::fs;
use std::ops::ControlFlow;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use wordpair_core::{
    Game, GameStatistics, ScoringEngine, TickSource, WordLists, fallback_word_pairs, text_summary,
};
use wordpair_types::GameError;

/// Build the word supply from the configured files. Without a standard list
/// file the built-in pairs serve as the standard list.
pub fn load_word_lists(config: &Config) -> Result<WordLists> {
    let mut lists = WordLists::new();
    lists.set_default_probability(config.default_word_probability);

    match &config.words_file {
        Some(path) => {
            let count = lists
                .load_default_text(&read_list(path)?)
                .with_context(|| format!("Failed to parse word list {}", path.display()))?;
            info!(path = %path.display(), count, "Loaded standard word list");
        }
        None => lists.set_default_pairs(fallback_word_pairs()),
    }

    if let Some(path) = &config.custom_words_file {
        let count = lists
            .load_custom_text(&read_list(path)?)
            .with_context(|| format!("Failed to parse word list {}", path.display()))?;
        info!(path = %path.display(), count, "Loaded custom word list");
    }

    Ok(lists)
}

fn read_list(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read word list {}", path.display()))
}

/// The terminal session: one game, its console view and statistics.
pub struct App {
    config: Config,
    game: Game,
    stats: Arc<Mutex<GameStatistics>>,
}

impl App {
    pub fn new<T: TickSource + 'static>(config: Config, ticker: T) -> Result<Self> {
        let words = load_word_lists(&config)?;
        let mut game = Game::new().with_tick_source(ticker).with_word_supply(words);
        game.add_handler(Box::new(ConsoleView::with_rule(config.end_game_rule)));
        let stats = GameStatistics::with_history_limit(config.stats_history_limit).attach(&mut game);

        let mut app = Self {
            config,
            game,
            stats,
        };
        app.new_game().context("Failed to start the first game")?;
        Ok(app)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn statistics(&self) -> MutexGuard<'_, GameStatistics> {
        self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn new_game(&mut self) -> Result<(), GameError> {
        self.game.init_with_config(self.config.game_config())
    }

    pub fn handle(&mut self, command: Command) -> ControlFlow<()> {
        let result = match command {
            Command::Start => self.game.start_round(),
            Command::Score(action) => self.game.apply_action(action).map(|_| ()),
            Command::Next => self.game.advance_to_next_team().map(|_| ()),
            Command::Reset => {
                self.game.reset_game();
                Ok(())
            }
            Command::NewGame => self.new_game(),
            Command::Scores => {
                println!("{}", self.scoreboard());
                Ok(())
            }
            Command::Stats => {
                println!("{}", self.stats_summary());
                Ok(())
            }
            Command::Export => {
                println!("{}", self.stats_json());
                Ok(())
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => return ControlFlow::Break(()),
        };

        if let Err(e) = result {
            warn!(?command, error = %e, "Command rejected");
            println!("! {}", e);
        }
        ControlFlow::Continue(())
    }

    pub fn on_tick(&mut self) {
        self.game.tick();
    }

    pub fn scoreboard(&self) -> String {
        let teams = self.game.teams();
        let mut out = String::from("Scores:");
        for (index, score) in ScoringEngine::standings(teams) {
            let marker = if index == self.game.current_team_index() { "*" } else { " " };
            let name = teams.get(index).map(|t| t.name.as_str()).unwrap_or("?");
            let _ = write!(out, "\n {} {:<16} {:>4}", marker, name, score);
        }
        if let Some(config) = self.game.config() {
            let _ = write!(out, "\n   target: {} points", config.target_score);
        }
        out
    }

    pub fn stats_summary(&self) -> String {
        match self.statistics().last_game() {
            Some(record) => text_summary(record),
            None => "No finished game yet.".to_string(),
        }
    }

    pub fn stats_json(&self) -> String {
        let stats = self.statistics();
        match stats.last_game() {
            Some(record) => serde_json::to_string_pretty(record)
                .unwrap_or_else(|e| format!("Failed to export statistics: {}", e)),
            None => "null".to_string(),
        }
    }
}

/// Read commands from stdin and drive the round timer until `quit` or EOF.
pub async fn run(config: Config) -> Result<()> {
    let (ticker, mut timer_rx) = IntervalTicker::new();
    let mut app = App::new(config, ticker)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer = None;

    println!("{}", HELP);

    loop {
        tokio::select! {
            biased;

            changed = timer_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                timer = interval_for(*timer_rx.borrow_and_update());
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(command) => {
                        if app.handle(command).is_break() {
                            break;
                        }
                    }
                    Err(e) => println!("! {}", e),
                }
            }
            _ = next_tick(&mut timer) => app.on_tick(),
        }
    }

    info!("Leaving");
    Ok(())
}
