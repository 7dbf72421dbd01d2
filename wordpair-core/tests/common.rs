#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use wordpair_core::{Game, GameEventHandler, ManualTicker, WordSelector, WordSupply, default_teams};
use wordpair_types::{EventKind, GameEvent, WordPair};

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().iter().map(GameEvent::kind).collect()
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Hands out pairs in a fixed cycle so draws are predictable.
pub struct CyclingSupply {
    pairs: Vec<WordPair>,
    next: usize,
}

impl CyclingSupply {
    pub fn new(pairs: Vec<WordPair>) -> Self {
        Self { pairs, next: 0 }
    }

    pub fn numbered(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|i| WordPair::new(format!("Wort{i}"), format!("Doppelwort{i}")))
                .collect(),
        )
    }
}

impl WordSupply for CyclingSupply {
    fn has_words(&self) -> bool {
        !self.pairs.is_empty()
    }

    fn random_word_pair(&mut self) -> Option<WordPair> {
        let pair = self.pairs.get(self.next % self.pairs.len().max(1)).cloned();
        self.next += 1;
        pair
    }

    fn word_count(&self) -> usize {
        self.pairs.len()
    }
}

/// A game with `team_count` default teams, a manual ticker and an event collector attached.
pub fn create_game(
    team_count: usize,
    round_time: u32,
    target: i32,
) -> (Game, ManualTicker, EventCollector) {
    let ticker = ManualTicker::new();
    let collector = EventCollector::new();
    let mut game = Game::new()
        .with_tick_source(ticker.clone())
        .with_word_selector(WordSelector::with_seed(7))
        .with_word_supply(CyclingSupply::numbered(5));
    game.add_handler(Box::new(collector.clone()));
    game.init_game(default_teams(team_count).unwrap(), round_time, target)
        .unwrap();
    (game, ticker, collector)
}

/// Play the current team's turn: start, score, then hand over.
pub fn play_turn(game: &mut Game, points: &[i32]) -> wordpair_core::TurnOutcome {
    game.start_round().unwrap();
    for p in points {
        game.add_points(*p).unwrap();
    }
    game.advance_to_next_team().unwrap()
}
