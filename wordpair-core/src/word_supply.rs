use anyhow::{Result, anyhow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wordpair_types::WordPair;

pub const DEFAULT_LIST_PROBABILITY: u8 = 50;

/// Source of word pairs for the game. The state machine only draws pairs
/// and asks how many exist; it never inspects the lists behind them.
pub trait WordSupply: Send {
    fn has_words(&self) -> bool;

    fn random_word_pair(&mut self) -> Option<WordPair>;

    fn word_count(&self) -> usize;
}

/// Parse a word list where each line reads `compound;simple`.
///
/// Blank lines, `#` comments and lines without exactly one separator or with
/// an empty side are skipped. A text without a single valid pair is an error.
pub fn parse_word_pairs(text: &str) -> Result<Vec<WordPair>> {
    let pairs: Vec<WordPair> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split(';');
            let compound = parts.next()?.trim();
            let simple = parts.next()?.trim();
            if parts.next().is_some() || compound.is_empty() || simple.is_empty() {
                return None;
            }
            Some(WordPair::new(simple, compound))
        })
        .collect();

    if pairs.is_empty() {
        return Err(anyhow!("No valid word pairs found"));
    }

    Ok(pairs)
}

/// A standard list and an optional custom list, drawn from by weighted chance.
#[derive(Debug)]
pub struct WordLists {
    default_pairs: Vec<WordPair>,
    custom_pairs: Vec<WordPair>,
    default_probability: u8, // Percent chance to draw from the standard list
    rng: StdRng,
}

impl WordLists {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic draws, mainly for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            default_pairs: Vec::new(),
            custom_pairs: Vec::new(),
            default_probability: DEFAULT_LIST_PROBABILITY,
            rng,
        }
    }

    /// Replace the standard list from text. Returns the number of pairs loaded.
    /// On a parse error the previous list is kept.
    pub fn load_default_text(&mut self, text: &str) -> Result<usize> {
        self.default_pairs = parse_word_pairs(text)?;
        Ok(self.default_pairs.len())
    }

    /// Replace the custom list from text. Returns the number of pairs loaded.
    pub fn load_custom_text(&mut self, text: &str) -> Result<usize> {
        self.custom_pairs = parse_word_pairs(text)?;
        Ok(self.custom_pairs.len())
    }

    pub fn set_default_pairs(&mut self, pairs: Vec<WordPair>) {
        self.default_pairs = pairs;
    }

    pub fn set_custom_pairs(&mut self, pairs: Vec<WordPair>) {
        self.custom_pairs = pairs;
    }

    /// Values above 100 are clamped.
    pub fn set_default_probability(&mut self, percent: u8) {
        self.default_probability = percent.min(100);
    }

    pub fn default_probability(&self) -> u8 {
        self.default_probability
    }

    pub fn default_count(&self) -> usize {
        self.default_pairs.len()
    }

    pub fn custom_count(&self) -> usize {
        self.custom_pairs.len()
    }

    fn pick(rng: &mut StdRng, list: &[WordPair]) -> Option<WordPair> {
        if list.is_empty() {
            return None;
        }
        let index = rng.random_range(0..list.len());
        list.get(index).cloned()
    }
}

impl Default for WordLists {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSupply for WordLists {
    fn has_words(&self) -> bool {
        !self.default_pairs.is_empty() || !self.custom_pairs.is_empty()
    }

    fn random_word_pair(&mut self) -> Option<WordPair> {
        match (self.default_pairs.is_empty(), self.custom_pairs.is_empty()) {
            (true, true) => None,
            (true, false) => Self::pick(&mut self.rng, &self.custom_pairs),
            (false, true) => Self::pick(&mut self.rng, &self.default_pairs),
            (false, false) => {
                let roll = self.rng.random_range(0..100u8);
                if roll < self.default_probability {
                    Self::pick(&mut self.rng, &self.default_pairs)
                } else {
                    Self::pick(&mut self.rng, &self.custom_pairs)
                }
            }
        }
    }

    fn word_count(&self) -> usize {
        self.default_pairs.len() + self.custom_pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_pairs() {
        let text = "Hausboot;Boot\n# comment\n\n  Waldweg ; Weg  \nkaputt\nA;B;C\n;Leer\nLeer;\n";
        let pairs = parse_word_pairs(text).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], WordPair::new("Boot", "Hausboot"));
        assert_eq!(pairs[1], WordPair::new("Weg", "Waldweg"));
    }

    #[test]
    fn test_parse_rejects_empty_list() {
        let result = parse_word_pairs("# only a comment\n\nnot a pair\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No valid word pairs"));
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let mut lists = WordLists::with_seed(1);
        assert_eq!(lists.load_default_text("Hausboot;Boot\nFußball;Ball").unwrap(), 2);
        assert!(lists.load_default_text("garbage").is_err());
        assert_eq!(lists.default_count(), 2);
    }

    #[test]
    fn test_empty_lists() {
        let mut lists = WordLists::with_seed(7);
        assert!(!lists.has_words());
        assert_eq!(lists.word_count(), 0);
        assert_eq!(lists.random_word_pair(), None);
    }

    #[test]
    fn test_single_list_is_used_regardless_of_probability() {
        let mut lists = WordLists::with_seed(3);
        lists.load_custom_text("Apfelbaum;Baum").unwrap();
        lists.set_default_probability(100);

        for _ in 0..20 {
            assert_eq!(lists.random_word_pair(), Some(WordPair::new("Baum", "Apfelbaum")));
        }
    }

    #[test]
    fn test_probability_extremes() {
        let mut lists = WordLists::with_seed(11);
        lists.load_default_text("Hausboot;Boot").unwrap();
        lists.load_custom_text("Regenmantel;Mantel").unwrap();
        assert_eq!(lists.word_count(), 2);

        lists.set_default_probability(100);
        for _ in 0..20 {
            assert_eq!(lists.random_word_pair().unwrap().simple, "Boot");
        }

        lists.set_default_probability(0);
        for _ in 0..20 {
            assert_eq!(lists.random_word_pair().unwrap().simple, "Mantel");
        }
    }

    #[test]
    fn test_probability_is_clamped() {
        let mut lists = WordLists::with_seed(0);
        lists.set_default_probability(250);
        assert_eq!(lists.default_probability(), 100);
    }
}
