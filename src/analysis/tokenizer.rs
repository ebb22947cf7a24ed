//! Word tokenizer.
//!
//! A token is a maximal run of ASCII letters taken from the lowercased text.
//! Digits, punctuation, hyphens and whitespace are separators and never part
//! of a token, so `co-op` yields `co` and `op`.
//!
//! # Examples
//!
//! ```
//! use typofinder::analysis::tokenizer::tokenize;
//!
//! let tokens = tokenize("Hello, World! 123 co-op");
//! assert_eq!(tokens, vec!["hello", "world", "co", "op"]);
//! ```

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches a token in already lowercased text.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z]+").expect("word pattern should be valid"));

/// Matches a token candidate in text that still carries its original casing.
static CASED_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Za-z]+").expect("cased word pattern should be valid"));

/// Same as [`CASED_WORD_PATTERN`], for raw bytes that may not be UTF-8.
static CASED_WORD_BYTES_PATTERN: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    regex::bytes::Regex::new("(?-u)[A-Za-z]+").expect("cased word pattern should be valid")
});

/// Split `text` into normalized word tokens, in order, duplicates included.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collect the distinct tokens of `text`.
pub fn word_set(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Rewrite the words of `text` without touching anything else.
///
/// `rewrite` receives every run of ASCII letters in its original casing and
/// returns the replacement, or `None` to keep the word as is. The result
/// borrows `text` when nothing was replaced.
pub fn rewrite_words<F>(text: &str, mut rewrite: F) -> Cow<'_, str>
where
    F: FnMut(&str) -> Option<String>,
{
    if !CASED_WORD_PATTERN
        .find_iter(text)
        .any(|m| rewrite(m.as_str()).is_some())
    {
        return Cow::Borrowed(text);
    }

    CASED_WORD_PATTERN.replace_all(text, |caps: &Captures| {
        let word = &caps[0];
        rewrite(word).unwrap_or_else(|| word.to_string())
    })
}

/// Byte-level [`rewrite_words`]: every byte outside a replaced word is kept
/// as is, including bytes that are not valid UTF-8.
pub fn rewrite_word_bytes<F>(bytes: &[u8], mut rewrite: F) -> Cow<'_, [u8]>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut rewritten: Option<Vec<u8>> = None;
    let mut last = 0;

    for m in CASED_WORD_BYTES_PATTERN.find_iter(bytes) {
        // Matches are ASCII letters only.
        let word = String::from_utf8_lossy(m.as_bytes());
        if let Some(replacement) = rewrite(&word) {
            let out = rewritten.get_or_insert_with(|| Vec::with_capacity(bytes.len()));
            out.extend_from_slice(&bytes[last..m.start()]);
            out.extend_from_slice(replacement.as_bytes());
            last = m.end();
        }
    }

    match rewritten {
        Some(mut out) => {
            out.extend_from_slice(&bytes[last..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(bytes),
    }
}
