//! Per-file typo detection.
//!
//! A [`TypoFinder`] walks one file at a time through
//! `Idle -> Tokenized -> Scored -> Rendered`: the file is read and tokenized,
//! its vocabulary is diffed against the dictionary and every unknown word gets
//! a suggestion. The scored result can then be rendered any number of times
//! as a table, as annotated lines, or written back over the file.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{rewrite_word_bytes, rewrite_words, word_set};
use crate::error::{Result, TypofinderError};
use crate::spelling::corrector::Corrector;
use crate::spelling::dictionary::Dictionary;

/// Width of the table separators.
const TABLE_WIDTH: usize = 72;

/// Unknown words of one file and their suggested corrections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResult {
    typos: BTreeMap<String, Option<String>>,
}

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        ScanResult {
            typos: BTreeMap::new(),
        }
    }

    /// Record an unknown word and its suggestion, if any.
    pub fn insert(&mut self, word: String, suggestion: Option<String>) {
        self.typos.insert(word, suggestion);
    }

    /// Look up an unknown word. The outer `None` means the word was not
    /// flagged, the inner one that no suggestion exists.
    pub fn get(&self, word: &str) -> Option<Option<&str>> {
        self.typos.get(word).map(|s| s.as_deref())
    }

    /// Check if a word was flagged.
    pub fn contains(&self, word: &str) -> bool {
        self.typos.contains_key(word)
    }

    /// Get the suggestion for a flagged word.
    pub fn suggestion(&self, word: &str) -> Option<&str> {
        self.get(word).flatten()
    }

    /// Iterate over flagged words in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.typos.iter().map(|(w, s)| (w.as_str(), s.as_deref()))
    }

    /// Number of flagged words.
    pub fn len(&self) -> usize {
        self.typos.len()
    }

    /// Check if no word was flagged.
    pub fn is_empty(&self) -> bool {
        self.typos.is_empty()
    }

    /// Annotate the flagged words of one line, keeping their casing.
    ///
    /// `Teh` becomes `[[Teh ==> the]]`, or `[[Teh]]` without a suggestion.
    pub fn annotate_line<'l>(&self, line: &'l str) -> Cow<'l, str> {
        rewrite_words(line, |word| self.annotation(word))
    }

    /// Byte-level [`ScanResult::annotate_line`] for raw file contents.
    pub fn annotate_bytes<'l>(&self, line: &'l [u8]) -> Cow<'l, [u8]> {
        rewrite_word_bytes(line, |word| self.annotation(word))
    }

    fn annotation(&self, word: &str) -> Option<String> {
        let suggestion = self.get(&word.to_ascii_lowercase())?;
        Some(match suggestion {
            Some(suggestion) => format!("[[{word} ==> {suggestion}]]"),
            None => format!("[[{word}]]"),
        })
    }
}

/// How a scanned file is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Print the unknown words and suggestions as a table.
    pub table: bool,
    /// Print the affected lines with the unknown words annotated.
    pub lines: bool,
    /// Replace the file contents with the annotated text.
    pub overwrite: bool,
    /// Words treated as known for this run only.
    pub ignore: Vec<String>,
}

impl ScanOptions {
    /// Whether any render mode was requested.
    pub fn has_render_mode(&self) -> bool {
        self.table || self.lines || self.overwrite
    }
}

/// Where a [`TypoFinder`] is in its per-file cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No file loaded.
    Idle,
    /// File read and tokenized.
    Tokenized,
    /// Unknown words found and corrected.
    Scored,
    /// Result rendered at least once. Further renders stay here.
    Rendered,
}

/// The file currently being processed.
#[derive(Debug)]
struct Source {
    path: PathBuf,
    /// Bytes as read, written back by overwrite.
    raw: Vec<u8>,
    /// Lossy UTF-8 view of `raw`, tokenized and displayed.
    content: String,
}

#[derive(Debug)]
enum ScanState {
    Idle,
    Tokenized {
        source: Source,
        words: HashSet<String>,
    },
    Scored {
        source: Source,
        result: ScanResult,
        rendered: bool,
    },
}

/// Finds unknown words in text files using a dictionary.
///
/// The dictionary is only read, so one dictionary can back any number of
/// finders. Loading a new file always starts from an empty result.
pub struct TypoFinder<'a, C: Corrector + ?Sized = Dictionary> {
    dictionary: &'a Dictionary,
    corrector: &'a C,
    state: ScanState,
}

impl<'a> TypoFinder<'a> {
    /// Create a finder that corrects with the dictionary itself.
    pub fn new(dictionary: &'a Dictionary) -> Self {
        TypoFinder::with_corrector(dictionary, dictionary)
    }
}

impl<'a, C: Corrector + ?Sized> TypoFinder<'a, C> {
    /// Create a finder with a custom corrector.
    pub fn with_corrector(dictionary: &'a Dictionary, corrector: &'a C) -> Self {
        TypoFinder {
            dictionary,
            corrector,
            state: ScanState::Idle,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> ScanPhase {
        match self.state {
            ScanState::Idle => ScanPhase::Idle,
            ScanState::Tokenized { .. } => ScanPhase::Tokenized,
            ScanState::Scored { rendered: false, .. } => ScanPhase::Scored,
            ScanState::Scored { rendered: true, .. } => ScanPhase::Rendered,
        }
    }

    /// Path of the file being processed.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            ScanState::Idle => None,
            ScanState::Tokenized { source, .. } | ScanState::Scored { source, .. } => {
                Some(&source.path)
            }
        }
    }

    /// Get the result of the last scored file.
    pub fn result(&self) -> Option<&ScanResult> {
        match &self.state {
            ScanState::Scored { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Drop the current file and its result.
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
        debug!("Result map has been cleared.");
    }

    /// Read and tokenize a file.
    ///
    /// Bytes that are not valid UTF-8 are replaced for tokenizing only; the
    /// raw bytes are kept for [`TypoFinder::overwrite`].
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.reset();
        let path = path.as_ref();
        let raw = fs::read(path)?;
        let content = String::from_utf8_lossy(&raw).into_owned();
        self.load_source(path.to_path_buf(), raw, content);
        Ok(())
    }

    /// Tokenize text that was already read from `path`.
    pub fn load_text<P: Into<PathBuf>>(&mut self, path: P, content: String) {
        let raw = content.as_bytes().to_vec();
        self.load_source(path.into(), raw, content);
    }

    fn load_source(&mut self, path: PathBuf, raw: Vec<u8>, content: String) {
        let words = word_set(&content);
        let source = Source { path, raw, content };
        debug!(
            "Tokenized '{}': {} distinct word(s)",
            source.path.display(),
            words.len()
        );
        self.state = ScanState::Tokenized { source, words };
    }

    /// Find the unknown words of the loaded file and suggest corrections.
    ///
    /// Scanning against an empty dictionary is refused: every word would be
    /// flagged. The file is dropped in that case.
    pub fn score(&mut self) -> Result<&ScanResult> {
        let (source, words) = match std::mem::replace(&mut self.state, ScanState::Idle) {
            ScanState::Tokenized { source, words } => (source, words),
            state => {
                self.state = state;
                return Err(TypofinderError::invalid_operation(
                    "no tokenized file to score",
                ));
            }
        };

        if self.dictionary.is_empty() {
            error!("Dictionary is empty. Couldn't recognize typos in file(s).");
            return Err(TypofinderError::empty_dictionary(format!(
                "cannot scan '{}' with an empty dictionary",
                source.path.display()
            )));
        }

        let mut result = ScanResult::new();
        let unknown = self.dictionary.unknown_words(&words);
        if unknown.is_empty() {
            info!("No typo(s) found in file: '{}'", source.path.display());
        }
        for word in unknown {
            let suggestion = self.corrector.correct(&word);
            result.insert(word, suggestion);
        }

        self.state = ScanState::Scored {
            source,
            result,
            rendered: false,
        };
        self.result()
            .ok_or_else(|| TypofinderError::invalid_operation("scan result missing"))
    }

    /// Load and score a file in one step.
    pub fn scan<P: AsRef<Path>>(&mut self, path: P) -> Result<&ScanResult> {
        info!("Executing typofinder on '{}'", path.as_ref().display());
        self.load_file(path)?;
        self.score()
    }

    fn scored(&self) -> Result<(&Source, &ScanResult)> {
        match &self.state {
            ScanState::Scored { source, result, .. } => Ok((source, result)),
            _ => Err(TypofinderError::invalid_operation(
                "no scan result to render",
            )),
        }
    }

    /// Write the unknown words and their suggestions as a table.
    pub fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        let (_, result) = self.scored()?;
        if result.is_empty() {
            debug!("Result map is empty.");
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", "+".repeat(TABLE_WIDTH))?;
        writeln!(out, "{:33} ==> {:>33}", "Unknown word", "Suggestion")?;
        writeln!(out, "{}", "-".repeat(TABLE_WIDTH))?;
        for (word, suggestion) in result.iter() {
            match suggestion {
                Some(suggestion) => writeln!(out, "{word:33} ==> {suggestion:>33}")?,
                None => writeln!(out, "{word:33}")?,
            }
        }
        writeln!(out, "{}", "+".repeat(TABLE_WIDTH))?;
        writeln!(out)?;
        Ok(())
    }

    /// Annotated lines that contain at least one unknown word, with their
    /// 1-based line numbers.
    pub fn affected_lines(&self) -> Result<Vec<(usize, String)>> {
        let (source, result) = self.scored()?;
        if result.is_empty() {
            return Ok(Vec::new());
        }

        Ok(source
            .content
            .split_terminator('\n')
            .enumerate()
            .filter_map(|(i, line)| match result.annotate_line(line) {
                Cow::Owned(annotated) => Some((i + 1, annotated)),
                Cow::Borrowed(_) => None,
            })
            .collect())
    }

    /// Write the affected lines, each prefixed by its line number.
    pub fn write_affected_lines<W: Write>(&self, out: &mut W) -> Result<()> {
        let lines = self.affected_lines()?;
        if lines.is_empty() {
            debug!("Result map is empty.");
            return Ok(());
        }

        for (number, line) in lines {
            writeln!(out, "{number}:{}", line.trim())?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// The whole file with every unknown word annotated.
    ///
    /// Line count is kept, unaffected lines are returned byte for byte and
    /// the text always ends with a newline.
    pub fn annotated_text(&self) -> Result<String> {
        let (source, result) = self.scored()?;
        let mut text = String::with_capacity(source.content.len());
        for line in source.content.split_terminator('\n') {
            text.push_str(&result.annotate_line(line));
            text.push('\n');
        }
        Ok(text)
    }

    /// The raw file bytes with every unknown word annotated.
    ///
    /// Same line handling as [`TypoFinder::annotated_text`], but bytes
    /// outside the annotations are copied as read, even when they are not
    /// valid UTF-8.
    pub fn annotated_bytes(&self) -> Result<Vec<u8>> {
        let (source, result) = self.scored()?;
        let mut bytes = Vec::with_capacity(source.raw.len());
        for line in byte_lines(&source.raw) {
            bytes.extend_from_slice(&result.annotate_bytes(line));
            bytes.push(b'\n');
        }
        Ok(bytes)
    }

    /// Replace the file contents with the annotated bytes.
    ///
    /// There is no backup. Files without unknown words are left untouched;
    /// returns whether the file was written.
    pub fn overwrite(&self) -> Result<bool> {
        let (source, result) = self.scored()?;
        if result.is_empty() {
            return Ok(false);
        }

        let bytes = self.annotated_bytes()?;
        fs::write(&source.path, bytes)?;
        info!("File has been overwritten: '{}'", source.path.display());
        Ok(true)
    }

    /// Render the scored file in every mode `options` asks for and move to
    /// [`ScanPhase::Rendered`].
    pub fn render<W: Write>(&mut self, options: &ScanOptions, out: &mut W) -> Result<()> {
        if options.table {
            self.write_table(out)?;
        }
        if options.lines {
            self.write_affected_lines(out)?;
        }
        if options.overwrite {
            self.overwrite()?;
        }

        if let ScanState::Scored { rendered, .. } = &mut self.state {
            *rendered = true;
        }
        Ok(())
    }
}

/// Split raw contents on `\n` the way `str::split_terminator` does.
fn byte_lines(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = raw.strip_suffix(b"\n").unwrap_or(raw);
    body.split(|b| *b == b'\n').filter(move |_| !raw.is_empty())
}
