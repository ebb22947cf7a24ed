//! Text analysis for typofinder.
//!
//! Turns raw document text into the normalized word tokens the dictionary
//! and the typo finder work with.

pub mod tokenizer;

pub use tokenizer::{tokenize, word_set};
