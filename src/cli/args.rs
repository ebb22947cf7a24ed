//! Command line argument parsing for typofinder using clap.

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::tokenizer::tokenize;
use crate::spelling::typo_finder::ScanOptions;

/// Default dictionary file, relative to the working directory.
pub const DEFAULT_DICTIONARY: &str = "dictionary.json";

/// Typofinder - check plain-text documentation for misspelled words
#[derive(Parser, Debug, Clone)]
#[command(name = "typofinder")]
#[command(about = "Check for misspelled words in your plain-text files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TypofinderArgs {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode, only errors are logged (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypofinderArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // -v
            _ => LevelFilter::Debug, // -vv and more
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Find typos in a file or in every text file of a directory
    Check(CheckArgs),

    /// Train, extend or prune a dictionary
    Train(TrainArgs),
}

/// Arguments for checking files
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// A file or a directory to check
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Dictionary (JSON) containing the known words
    #[arg(
        short,
        long,
        value_name = "DICTIONARY_FILE",
        env = "TYPOFINDER_DICTIONARY",
        default_value = DEFAULT_DICTIONARY
    )]
    pub dictionary: PathBuf,

    /// Only check files ending with this extension (repeatable)
    #[arg(short, long = "ext", value_name = "EXTENSION")]
    pub extensions: Vec<String>,

    /// Treat these words as known for this run (comma-separated, repeatable)
    #[arg(short, long, value_delimiter = ',', value_name = "WORDS")]
    pub ignore: Vec<String>,

    /// Print unknown words and suggestions as a table
    #[arg(short, long)]
    pub table: bool,

    /// Print the affected lines with unknown words annotated (default)
    #[arg(short, long)]
    pub lines: bool,

    /// Write the annotations into the checked files (no backup is made)
    #[arg(long)]
    pub overwrite: bool,
}

impl CheckArgs {
    /// Render options for this run; annotated lines when nothing was asked.
    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions {
            table: self.table,
            lines: self.lines,
            overwrite: self.overwrite,
            ignore: self.ignore.iter().flat_map(|w| tokenize(w)).collect(),
        };
        if !options.has_render_mode() {
            options.lines = true;
        }
        options
    }
}

/// Arguments for dictionary maintenance
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Dictionary (JSON) to create or update
    #[arg(
        short,
        long,
        value_name = "DICTIONARY_FILE",
        env = "TYPOFINDER_DICTIONARY",
        default_value = DEFAULT_DICTIONARY
    )]
    pub dictionary: PathBuf,

    /// Train the dictionary from a text file or every text file of a directory
    #[arg(long = "from", value_name = "FILE_OR_DIR")]
    pub corpus: Option<PathBuf>,

    /// Only train from files ending with this extension (repeatable)
    #[arg(short, long = "ext", value_name = "EXTENSION")]
    pub extensions: Vec<String>,

    /// Add words to the dictionary (comma-separated, repeatable)
    #[arg(short, long, value_delimiter = ',', value_name = "WORDS")]
    pub add: Vec<String>,

    /// Delete words from the dictionary (comma-separated, repeatable)
    #[arg(long, value_delimiter = ',', value_name = "WORDS")]
    pub delete: Vec<String>,

    /// Print the words that would be added without saving anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl TrainArgs {
    /// Normalized words to add.
    pub fn words_to_add(&self) -> Vec<String> {
        self.add.iter().flat_map(|w| tokenize(w)).collect()
    }

    /// Normalized words to delete.
    pub fn words_to_delete(&self) -> Vec<String> {
        self.delete.iter().flat_map(|w| tokenize(w)).collect()
    }

    /// Check whether any change was requested.
    pub fn has_changes(&self) -> bool {
        self.corpus.is_some() || !self.add.is_empty() || !self.delete.is_empty()
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_check_command() {
        let args = TypofinderArgs::try_parse_from([
            "typofinder",
            "check",
            "docs/",
            "--dictionary",
            "words.json",
            "-e",
            ".tex",
            "--ext",
            ".adoc",
            "--table",
        ])
        .unwrap();

        if let Command::Check(check_args) = args.command {
            assert_eq!(check_args.input, PathBuf::from("docs/"));
            assert_eq!(check_args.dictionary, PathBuf::from("words.json"));
            assert_eq!(check_args.extensions, vec![".tex", ".adoc"]);
            assert!(check_args.table);
            assert!(!check_args.overwrite);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_check_defaults_to_annotated_lines() {
        let args = TypofinderArgs::try_parse_from(["typofinder", "check", "guide.txt"]).unwrap();

        if let Command::Check(check_args) = args.command {
            let options = check_args.scan_options();
            assert!(options.lines);
            assert!(!options.table);
            assert!(!options.overwrite);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_ignore_words_are_normalized() {
        let args = TypofinderArgs::try_parse_from([
            "typofinder",
            "check",
            "guide.txt",
            "--ignore",
            "Rustc,HTTP2",
            "-i",
            "co-op",
            "--overwrite",
        ])
        .unwrap();

        if let Command::Check(check_args) = args.command {
            let options = check_args.scan_options();
            assert_eq!(options.ignore, vec!["rustc", "http", "co", "op"]);
            assert!(options.overwrite);
            assert!(!options.lines);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_train_command() {
        let args = TypofinderArgs::try_parse_from([
            "typofinder",
            "train",
            "--dictionary",
            "words.json",
            "--add",
            "Foo,bar",
            "--delete",
            "baz",
            "--from",
            "corpus/",
            "--dry-run",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.words_to_add(), vec!["foo", "bar"]);
            assert_eq!(train_args.words_to_delete(), vec!["baz"]);
            assert_eq!(train_args.corpus, Some(PathBuf::from("corpus/")));
            assert!(train_args.dry_run);
            assert!(train_args.has_changes());
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_train_without_changes() {
        let args = TypofinderArgs::try_parse_from(["typofinder", "train", "-d", "x.json"]).unwrap();

        if let Command::Train(train_args) = args.command {
            assert!(!train_args.has_changes());
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = TypofinderArgs::try_parse_from(["typofinder", "check", "a.txt"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::Warn);

        let args = TypofinderArgs::try_parse_from(["typofinder", "-v", "check", "a.txt"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::Info);

        let args = TypofinderArgs::try_parse_from(["typofinder", "check", "a.txt", "-vv"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::Debug);

        let args =
            TypofinderArgs::try_parse_from(["typofinder", "-vvv", "--quiet", "check", "a.txt"])
                .unwrap();
        assert_eq!(args.log_level(), LevelFilter::Error);
    }

    #[test]
    fn test_output_format() {
        let args =
            TypofinderArgs::try_parse_from(["typofinder", "--format", "json", "check", "a.txt"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(TypofinderArgs::try_parse_from(["typofinder", "check"]).is_err());
    }
}
