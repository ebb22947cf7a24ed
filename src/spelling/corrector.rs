//! Edit-distance spelling correction.
//!
//! The correction of an unknown word is the most frequent dictionary word
//! one edit away from it; when there is none, the most frequent word two
//! edits away. An edit is the deletion, transposition of two adjacent
//! letters, substitution or insertion of a single letter.

use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::spelling::dictionary::Dictionary;

/// Letters used for substitutions and insertions.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Something that can propose a correction for an unknown word.
pub trait Corrector {
    /// Return the suggested correction, or `None` when there is nothing to
    /// suggest.
    fn correct(&self, word: &str) -> Option<String>;
}

impl Corrector for Dictionary {
    fn correct(&self, word: &str) -> Option<String> {
        correct(word, self)
    }
}

/// Find the most probable correction of `word` in `dictionary`.
///
/// Returns `None` when `word` is already a dictionary word, and when no
/// dictionary word is within two edits of it.
///
/// # Examples
///
/// ```
/// use typofinder::spelling::corrector::correct;
/// use typofinder::spelling::dictionary::Dictionary;
///
/// let dictionary: Dictionary = ["word", "word", "ward"].into_iter().collect();
/// assert_eq!(correct("wird", &dictionary), Some("word".to_string()));
/// assert_eq!(correct("word", &dictionary), None);
/// ```
pub fn correct(word: &str, dictionary: &Dictionary) -> Option<String> {
    if dictionary.contains(word) {
        return None;
    }

    let edits = edits1(word);
    let mut candidates = known(edits.iter(), dictionary);

    if candidates.is_empty() {
        candidates = known(edits.iter().flat_map(|e1| edits1(e1)), dictionary);
    }

    if candidates.is_empty() {
        debug!("No suggestion available for '{word}'");
        return None;
    }

    most_frequent(&candidates, dictionary).map(str::to_string)
}

/// Filter `words` down to dictionary words, ordered so ranking is stable.
fn known<I, S>(words: I, dictionary: &Dictionary) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .filter(|w| dictionary.contains(w.as_ref()))
        .map(|w| w.as_ref().to_string())
        .collect()
}

/// Pick the candidate with the highest frequency; the first one in word order
/// wins a tie.
fn most_frequent<'a>(candidates: &'a BTreeSet<String>, dictionary: &Dictionary) -> Option<&'a str> {
    let mut best: Option<(&str, u32)> = None;

    for candidate in candidates {
        let frequency = dictionary.frequency(candidate).unwrap_or(0);
        if best.is_none_or(|(_, top)| frequency > top) {
            best = Some((candidate.as_str(), frequency));
        }
    }

    best.map(|(word, _)| word)
}

/// All strings one edit away from `word`.
fn edits1(word: &str) -> HashSet<String> {
    let splits = word
        .char_indices()
        .map(|(i, _)| word.split_at(i))
        .chain(std::iter::once((word, "")));

    let mut edits = HashSet::new();
    for (left, right) in splits {
        let mut rest = right.chars();
        if let Some(first) = rest.next() {
            let tail = rest.as_str();

            // Deletes
            edits.insert(format!("{left}{tail}"));

            // Transposes
            let mut after = tail.chars();
            if let Some(second) = after.next() {
                edits.insert(format!("{left}{second}{first}{}", after.as_str()));
            }

            // Replaces
            for c in ALPHABET.chars() {
                edits.insert(format!("{left}{c}{tail}"));
            }
        }

        // Inserts
        for c in ALPHABET.chars() {
            edits.insert(format!("{left}{c}{right}"));
        }
    }

    edits
}
