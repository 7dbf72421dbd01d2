use std::collections::HashMap;
use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;
use wordpair_cli::commands::Command;
use wordpair_cli::config::Config;
use wordpair_cli::{App, load_word_lists};
use wordpair_core::{ManualTicker, WordSupply};
use wordpair_types::{RoundPhase, ScoreAction};

fn config_with(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn create_app(pairs: &[(&str, &str)]) -> (App, ManualTicker) {
    let ticker = ManualTicker::new();
    let app = App::new(config_with(pairs), ticker.clone()).unwrap();
    (app, ticker)
}

fn temp_list(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("wordpair-{}-{}.txt", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_app_starts_first_game() {
    let (app, ticker) = create_app(&[("TEAM_NAMES", "Owls,Foxes,Bears")]);
    assert_eq!(app.game().phase(), RoundPhase::AwaitingRoundStart);
    assert_eq!(app.game().teams().len(), 3);
    assert!(!ticker.is_running());
    assert!(app.statistics().is_tracking());
}

#[test]
fn test_commands_drive_turns() {
    let (mut app, ticker) = create_app(&[]);

    for command in [
        Command::Start,
        Command::Score(ScoreAction::Compound),
        Command::Score(ScoreAction::Simple),
        Command::Score(ScoreAction::Skip),
        Command::Next,
    ] {
        assert_eq!(app.handle(command), ControlFlow::Continue(()));
    }

    assert_eq!(app.game().scores(), vec![3, 0]);
    assert_eq!(app.game().current_team_index(), 1);
    assert_eq!(ticker.scheduled_count(), 1);
    assert!(!ticker.is_running());
    assert!(app.scoreboard().contains("Team 1"));
}

#[test]
fn test_rejected_command_keeps_session() {
    let (mut app, _) = create_app(&[]);
    assert_eq!(
        app.handle(Command::Score(ScoreAction::Simple)),
        ControlFlow::Continue(())
    );
    assert_eq!(app.game().scores(), vec![0, 0]);
}

#[test]
fn test_quit_breaks() {
    let (mut app, _) = create_app(&[]);
    assert_eq!(app.handle(Command::Quit), ControlFlow::Break(()));
}

#[test]
fn test_ticks_run_out_the_round() {
    let (mut app, ticker) = create_app(&[("ROUND_TIME_SECONDS", "2")]);
    app.handle(Command::Start);
    assert!(ticker.is_running());

    app.on_tick();
    app.on_tick();
    assert_eq!(app.game().phase(), RoundPhase::RoundEnded);
    assert!(!ticker.is_running());

    app.on_tick();
    assert_eq!(app.game().time_left(), 0);
}

#[test]
fn test_finished_game_shows_statistics() {
    let (mut app, _) = create_app(&[("TARGET_SCORE", "3")]);
    assert_eq!(app.stats_summary(), "No finished game yet.");
    assert_eq!(app.stats_json(), "null");

    for command in [
        Command::Start,
        Command::Score(ScoreAction::Compound),
        Command::Next,
        Command::Start,
        Command::Score(ScoreAction::Simple),
        Command::Next,
    ] {
        app.handle(command);
    }
    assert!(app.game().is_game_over());

    let summary = app.stats_summary();
    assert!(summary.contains("1. Team 1: 3 points"));
    assert!(summary.contains("- 2 rounds played"));

    let json: serde_json::Value = serde_json::from_str(&app.stats_json()).unwrap();
    assert_eq!(json["rounds"].as_array().map(Vec::len), Some(2));

    app.handle(Command::NewGame);
    assert_eq!(app.game().phase(), RoundPhase::AwaitingRoundStart);
    assert_eq!(app.game().scores(), vec![0, 0]);
}

#[test]
fn test_load_word_lists_from_files() {
    let standard = temp_list("standard", "Hausboot;Boot\nWaldweg;Weg\n");
    let custom = temp_list("custom", "# own words\nApfelbaum;Baum\n");
    let config = config_with(&[
        ("WORDS_FILE", standard.to_str().unwrap()),
        ("CUSTOM_WORDS_FILE", custom.to_str().unwrap()),
        ("DEFAULT_WORD_PROBABILITY", "70"),
    ]);

    let lists = load_word_lists(&config).unwrap();
    assert_eq!(lists.default_count(), 2);
    assert_eq!(lists.custom_count(), 1);
    assert_eq!(lists.word_count(), 3);
    assert_eq!(lists.default_probability(), 70);

    fs::remove_file(standard).ok();
    fs::remove_file(custom).ok();
}

#[test]
fn test_load_word_lists_reports_bad_files() {
    let missing = config_with(&[("WORDS_FILE", "/nonexistent/wordpair/words.txt")]);
    let err = load_word_lists(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read word list"));

    let empty = temp_list("empty", "# nothing here\n\n");
    let config = config_with(&[("WORDS_FILE", empty.to_str().unwrap())]);
    let err = load_word_lists(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse word list"));
    fs::remove_file(empty).ok();
}

#[test]
fn test_builtin_words_without_files() {
    let lists = load_word_lists(&config_with(&[])).unwrap();
    assert_eq!(lists.default_count(), 10);
    assert_eq!(lists.custom_count(), 0);
}
