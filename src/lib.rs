//! # Typofinder
//!
//! A dictionary-driven typo finder for plain-text and markup documentation.
//!
//! ## Features
//!
//! - Word frequency dictionary persisted as sorted JSON
//! - Norvig-style correction over edit distance one and two
//! - Per-file scanning with table, line-annotated and in-place rendering
//! - Dictionary maintenance: train from a corpus, add and delete words, dry run

pub mod analysis;
pub mod cli;
pub mod error;
pub mod spelling;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
