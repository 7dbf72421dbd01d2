use crate::WordSupply;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, warn};
use wordpair_types::WordPair;

/// Draw attempts before the used set is considered exhausted.
pub const MAX_DRAW_ATTEMPTS: usize = 100;

/// Built-in pairs used when no word supply is configured or it is empty.
/// Each entry is `(simple, compound)`.
pub const FALLBACK_WORD_PAIRS: [(&str, &str); 10] = [
    ("Boot", "Hausboot"),
    ("Feld", "Spielfeld"),
    ("Weg", "Waldweg"),
    ("Lampe", "Tischlampe"),
    ("Licht", "Sonnenlicht"),
    ("Seite", "Buchseite"),
    ("Mantel", "Regenmantel"),
    ("Ball", "Fußball"),
    ("Baum", "Apfelbaum"),
    ("Schloss", "Türschloss"),
];

pub fn fallback_word_pairs() -> Vec<WordPair> {
    FALLBACK_WORD_PAIRS
        .iter()
        .map(|(simple, compound)| WordPair::new(*simple, *compound))
        .collect()
}

/// Picks the next word pair while avoiding repeats within a session.
///
/// Candidates already shown are redrawn up to `max_attempts` times. Once every
/// pair has been shown (or the attempts run out) the used set is cleared and
/// the next candidate is taken as is.
pub struct WordSelector {
    used: HashSet<WordPair>,
    max_attempts: usize,
    rng: StdRng,
    on_fallback: bool,
}

impl WordSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            used: HashSet::new(),
            max_attempts: MAX_DRAW_ATTEMPTS,
            rng,
            on_fallback: false,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn is_used(&self, pair: &WordPair) -> bool {
        self.used.contains(pair)
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }

    /// Select from the supply, falling back to the built-in list when it has no words.
    pub fn select(&mut self, supply: &mut dyn WordSupply) -> WordPair {
        if !supply.has_words() {
            return self.select_fallback();
        }
        self.on_fallback = false;

        let mut candidate = None;
        if self.used.len() < supply.word_count() {
            for _ in 0..self.max_attempts {
                match supply.random_word_pair() {
                    Some(pair) if !self.used.contains(&pair) => {
                        candidate = Some(pair);
                        break;
                    }
                    Some(_) => continue,
                    None => break,
                }
            }
        }

        let pair = match candidate {
            Some(pair) => pair,
            None => {
                warn!(used = self.used.len(), "Word pool exhausted, reshuffling");
                self.used.clear();
                match supply.random_word_pair() {
                    Some(pair) => pair,
                    None => return self.select_fallback(),
                }
            }
        };

        self.accept(pair)
    }

    /// Select from the built-in list, skipping pairs already shown until all
    /// of them have been.
    pub fn select_fallback(&mut self) -> WordPair {
        if !self.on_fallback {
            warn!("No word supply available, using built-in words");
            self.on_fallback = true;
        }

        let mut unused: Vec<WordPair> = fallback_word_pairs()
            .into_iter()
            .filter(|pair| !self.used.contains(pair))
            .collect();
        if unused.is_empty() {
            debug!("Built-in words exhausted, reshuffling");
            self.used.clear();
            unused = fallback_word_pairs();
        }

        let index = self.rng.random_range(0..unused.len());
        let pair = unused.swap_remove(index);
        self.accept(pair)
    }

    pub fn is_on_fallback(&self) -> bool {
        self.on_fallback
    }

    fn accept(&mut self, pair: WordPair) -> WordPair {
        debug!(simple = %pair.simple, compound = %pair.compound, "Selected word pair");
        self.used.insert(pair.clone());
        pair
    }
}

impl Default for WordSelector {
    fn default() -> Self {
        Self::new()
    }
}
