//! Command implementations for typofinder CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TypofinderError};
use crate::spelling::*;
use crate::util::text_file::{find_text_files, is_text_file};

/// Execute a CLI command.
pub fn execute_command(args: TypofinderArgs) -> Result<()> {
    match &args.command {
        Command::Check(check_args) => check_files(check_args, &args),
        Command::Train(train_args) => train_dictionary(train_args, &args),
    }
}

/// Resolve the text files named by `input`.
///
/// A file must be text; a directory must contain at least one text file
/// matching `extensions`.
pub fn resolve_input_files(input: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(TypofinderError::not_found(format!(
            "File or directory does not exist: '{}'",
            input.display()
        )));
    }

    if !input.is_dir() {
        if !is_text_file(input)? {
            return Err(TypofinderError::invalid_argument(format!(
                "File is not a simple text file: '{}'",
                input.display()
            )));
        }
        return Ok(vec![input.to_path_buf()]);
    }

    if extensions.iter().any(|ext| ext.is_empty()) {
        warn!(
            "Giving an empty string in extensions will ignore other extension filters. \
             Every simple text file will be used in folder: '{}'",
            input.display()
        );
    }

    let files = find_text_files(input, extensions)?;
    if files.is_empty() {
        let message = if extensions.is_empty() {
            format!("No simple text files were found in directory: '{}'", input.display())
        } else {
            format!(
                "No simple text files were found with the extension(s) {:?} in directory: '{}'",
                extensions,
                input.display()
            )
        };
        return Err(TypofinderError::invalid_argument(message));
    }

    Ok(files)
}

/// Check files for typos.
fn check_files(args: &CheckArgs, cli_args: &TypofinderArgs) -> Result<()> {
    let files = resolve_input_files(&args.input, &args.extensions)?;

    if !args.dictionary.exists() {
        return Err(TypofinderError::not_found(format!(
            "Dictionary does not exist: '{}'",
            args.dictionary.display()
        )));
    }

    let mut dictionary = Dictionary::open(&args.dictionary)?;
    let options = args.scan_options();
    if !options.ignore.is_empty() {
        info!("Ignoring {} word(s) for this run", options.ignore.len());
        dictionary.train(&options.ignore);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;
    let mut finder = TypoFinder::new(&dictionary);

    for path in &files {
        let scanned = finder.scan(path).map(|_| ());
        match scanned {
            Ok(()) => output_scan(&mut finder, path, &options, cli_args, &mut out)?,
            Err(e) if e.is_recoverable() => {
                error!("{e}");
                failures += 1;
            }
            Err(e) => return Err(e),
        }
    }
    out.flush()?;

    if failures > 0 {
        return Err(TypofinderError::other(format!(
            "{failures} of {} file(s) could not be checked",
            files.len()
        )));
    }

    Ok(())
}

/// Apply add, delete and train operations to a dictionary.
fn train_dictionary(args: &TrainArgs, cli_args: &TypofinderArgs) -> Result<()> {
    if !args.has_changes() {
        return Err(TypofinderError::invalid_argument(
            "Nothing to do: give --from, --add or --delete",
        ));
    }

    let only_deleting = args.corpus.is_none() && args.add.is_empty();
    if only_deleting && !args.dictionary.exists() {
        return Err(TypofinderError::not_found(format!(
            "Could not delete from '{}': dictionary does not exist",
            args.dictionary.display()
        )));
    }

    let corpus = match &args.corpus {
        Some(path) => match resolve_input_files(path, &args.extensions) {
            Ok(files) => files,
            Err(TypofinderError::InvalidArgument(msg)) if path.is_dir() => {
                warn!("{msg}");
                Vec::new()
            }
            Err(e) => return Err(e),
        },
        None => Vec::new(),
    };

    let plan = TrainingPlan {
        corpus,
        add: args.words_to_add(),
        delete: args.words_to_delete(),
        dry_run: args.dry_run,
    };

    let report = Trainer::new(&args.dictionary).run(&plan)?;
    info!(
        "Trained {} word(s) from {} file(s), added {}, removed {}",
        report.trained_words,
        report.corpus_files,
        report.added_words,
        report.removed.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output_training_report(&report, cli_args, &mut out)?;
    out.flush()?;

    Ok(())
}
