//! Dictionary maintenance.
//!
//! A [`Trainer`] owns one persisted dictionary file. Running a
//! [`TrainingPlan`] loads the file if it exists, trains it from corpus
//! files, adds and deletes explicit words, in that order, and then either
//! saves the result or, in a dry run, only reports the words that saving
//! would add.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::tokenize;
use crate::error::Result;
use crate::spelling::dictionary::Dictionary;

/// Changes to apply to a dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Text files whose words are trained into the dictionary.
    pub corpus: Vec<PathBuf>,
    /// Normalized words to add.
    pub add: Vec<String>,
    /// Normalized words to delete.
    pub delete: Vec<String>,
    /// Compute the changes without saving them.
    pub dry_run: bool,
}

impl TrainingPlan {
    /// Whether the plan changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty() && self.add.is_empty() && self.delete.is_empty()
    }
}

/// What a training run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Corpus files read.
    pub corpus_files: usize,
    /// Words counted from the corpus.
    pub trained_words: usize,
    /// Explicit words counted.
    pub added_words: usize,
    /// Words removed from the dictionary.
    pub removed: Vec<String>,
    /// Words that could not be removed because they were absent.
    pub missing: Vec<String>,
    /// Words not in the persisted dictionary before the run.
    pub new_words: BTreeSet<String>,
    /// Unique words after the run.
    pub dictionary_size: usize,
    /// Whether the dictionary file was written.
    pub saved: bool,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

/// Applies training plans to a persisted dictionary.
#[derive(Debug, Clone)]
pub struct Trainer {
    dictionary_path: PathBuf,
}

impl Trainer {
    /// Create a trainer for the dictionary at `dictionary_path`.
    pub fn new<P: Into<PathBuf>>(dictionary_path: P) -> Self {
        Trainer {
            dictionary_path: dictionary_path.into(),
        }
    }

    /// Path of the persisted dictionary.
    pub fn dictionary_path(&self) -> &Path {
        &self.dictionary_path
    }

    /// Load the persisted dictionary, or start an empty one when the file does
    /// not exist yet. A malformed file is an error so it is never replaced.
    pub fn load(&self) -> Result<Dictionary> {
        if !self.dictionary_path.exists() {
            info!(
                "Dictionary does not exist yet, starting empty: '{}'",
                self.dictionary_path.display()
            );
            return Ok(Dictionary::new());
        }

        Dictionary::open(&self.dictionary_path)
    }

    /// Run `plan` against the dictionary.
    pub fn run(&self, plan: &TrainingPlan) -> Result<TrainingReport> {
        let mut dictionary = self.load()?;
        let mut report = TrainingReport {
            dry_run: plan.dry_run,
            ..Default::default()
        };

        for path in &plan.corpus {
            let bytes = fs::read(path)?;
            let words = tokenize(&String::from_utf8_lossy(&bytes));
            debug!("Training from '{}': {} word(s)", path.display(), words.len());
            report.trained_words += dictionary.train(&words);
            report.corpus_files += 1;
        }

        if !plan.add.is_empty() {
            report.added_words = dictionary.train(&plan.add);
        }

        if !plan.delete.is_empty() {
            for word in &plan.delete {
                if dictionary.contains(word) && !report.removed.contains(word) {
                    report.removed.push(word.clone());
                }
            }
            report.missing = dictionary.delete(&plan.delete);
        }

        report.dictionary_size = dictionary.len();

        if plan.dry_run {
            let snapshot = self.load()?;
            report.new_words = dictionary
                .iter()
                .map(|(word, _)| word)
                .filter(|word| !snapshot.contains(word))
                .map(str::to_string)
                .collect();
            info!(
                "Dry run: {} new word(s), dictionary not saved: '{}'",
                report.new_words.len(),
                self.dictionary_path.display()
            );
            return Ok(report);
        }

        report.saved = dictionary.save(&self.dictionary_path)?;
        if !report.saved {
            warn!(
                "Dictionary has not been saved: '{}'",
                self.dictionary_path.display()
            );
        }

        Ok(report)
    }
}
