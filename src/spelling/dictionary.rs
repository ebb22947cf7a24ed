//! Word frequency dictionary used for typo detection and correction.
//!
//! Keys are lowercase ASCII words, values are occurrence counts of at least
//! one. The persisted form is a flat JSON object with keys sorted ascending
//! so the file diffs cleanly under version control.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::{Result, TypofinderError};
use crate::spelling::corrector;

/// A dictionary that stores words and their frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    /// Words and their frequencies, ordered by word
    words: BTreeMap<String, u32>,
}

/// Whether `word` may be stored as a dictionary key.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Dictionary {
            words: BTreeMap::new(),
        }
    }

    /// Load a dictionary from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = Dictionary::new();
        dictionary.load(path)?;
        Ok(dictionary)
    }

    /// Increment the frequency of `word`, inserting it at 1 when absent.
    pub fn increment_word(&mut self, word: &str) {
        match self.words.get_mut(word) {
            Some(frequency) => *frequency = frequency.saturating_add(1),
            None => {
                self.words.insert(word.to_string(), 1);
            }
        }
    }

    /// Train the dictionary with normalized words.
    ///
    /// Every known word gets its frequency incremented, every new word is
    /// inserted with frequency 1. Strings that are not lowercase ASCII words
    /// are skipped. Returns the number of words counted.
    pub fn train<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = 0;
        let mut trained = 0;

        for word in words {
            seen += 1;
            let word = word.as_ref();
            if !is_valid_word(word) {
                debug!("Skipping invalid dictionary word: '{word}'");
                continue;
            }
            self.increment_word(word);
            trained += 1;
        }

        if seen == 0 {
            warn!("No words will be added to dictionary: word list is empty.");
        }

        trained
    }

    /// Remove words from the dictionary.
    ///
    /// Deletion is best effort: absent words are logged and returned, the
    /// rest are removed. A word listed twice is handled once.
    pub fn delete<I, S>(&mut self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let words: Vec<S> = words
            .into_iter()
            .filter(|w| seen.insert(w.as_ref().to_string()))
            .collect();

        if words.is_empty() {
            warn!("No words will be deleted from dictionary: word list is empty.");
            return Vec::new();
        }

        if self.words.is_empty() {
            warn!("Can't remove word(s): dictionary is empty.");
            return words.iter().map(|w| w.as_ref().to_string()).collect();
        }

        let mut missing = Vec::new();
        for word in &words {
            let word = word.as_ref();
            if self.words.remove(word).is_none() {
                warn!("Can't remove word: '{word}'. No such word in dictionary.");
                missing.push(word.to_string());
            }
        }

        missing
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> Option<u32> {
        self.words.get(word).copied()
    }

    /// Return the subset of `words` that are not dictionary keys.
    pub fn unknown_words(&self, words: &HashSet<String>) -> HashSet<String> {
        if words.is_empty() {
            debug!("There is no unknown word because the given word set is empty.");
            return HashSet::new();
        }

        words
            .iter()
            .filter(|word| !self.words.contains_key(word.as_str()))
            .cloned()
            .collect()
    }

    /// Suggest the most probable known word for `word`.
    ///
    /// Returns `None` when `word` is already known or when nothing within
    /// two edits is in the dictionary.
    pub fn correct(&self, word: &str) -> Option<String> {
        corrector::correct(word, self)
    }

    /// Iterate over words and frequencies in ascending word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(word, freq)| (word.as_str(), *freq))
    }

    /// Get the total number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Replace the in-memory words with the contents of a JSON file.
    ///
    /// Fails with [`TypofinderError::NotFound`] when `path` does not exist and
    /// with [`TypofinderError::Malformed`] when it is not a flat word to
    /// frequency object. On failure the current contents are kept.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TypofinderError::not_found(format!(
                "Dictionary does not exist: '{}'",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TypofinderError::malformed(format!(
                "Given path is not a dictionary: '{}': {e}",
                path.display()
            ))
        })?;
        let words = Self::parse(&content).map_err(|e| match e {
            TypofinderError::Malformed(msg) => {
                TypofinderError::malformed(format!("'{}': {msg}", path.display()))
            }
            other => other,
        })?;

        self.words = words;
        info!("Dictionary has been loaded: '{}'", path.display());
        Ok(())
    }

    /// Parse the persisted JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Dictionary {
            words: Self::parse(json)?,
        })
    }

    fn parse(json: &str) -> Result<BTreeMap<String, u32>> {
        let raw: BTreeMap<String, u64> = serde_json::from_str(json)
            .map_err(|e| TypofinderError::malformed(format!("expected a word to count object: {e}")))?;

        let mut words = BTreeMap::new();
        for (word, frequency) in raw {
            if !is_valid_word(&word) {
                return Err(TypofinderError::malformed(format!(
                    "invalid word '{word}', expected lowercase letters only"
                )));
            }
            let frequency = u32::try_from(frequency)
                .ok()
                .filter(|f| *f >= 1)
                .ok_or_else(|| {
                    TypofinderError::malformed(format!(
                        "invalid frequency {frequency} for word '{word}'"
                    ))
                })?;
            words.insert(word, frequency);
        }

        Ok(words)
    }

    /// Render the persisted JSON form: sorted keys, two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(&self.words)?;
        json.push('\n');
        Ok(json)
    }

    /// Save the dictionary to a JSON file.
    ///
    /// An empty dictionary is never written, so a populated file cannot be
    /// truncated by accident; in that case `Ok(false)` is returned. The file
    /// is replaced atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        let path = path.as_ref();
        if self.words.is_empty() {
            warn!("Dictionary is empty, refusing save: '{}'", path.display());
            return Ok(false);
        }

        if path.exists() {
            info!("Dictionary will be overwritten: '{}'", path.display());
        } else {
            info!("Dictionary will be created: '{}'", path.display());
        }

        let parent_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(self.to_json()?.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| e.error)?;

        info!("Dictionary has been saved: '{}'", path.display());
        Ok(true)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.train(iter);
        dictionary
    }
}
