//! Output formatting for CLI commands.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, TypofinderArgs};
use crate::error::Result;
use crate::spelling::trainer::TrainingReport;
use crate::spelling::typo_finder::{ScanOptions, ScanResult, TypoFinder};
use crate::spelling::Corrector;

/// Result structure for one checked file.
#[derive(Debug, Serialize)]
pub struct FileScanResult<'a> {
    pub file: String,
    pub typos: &'a ScanResult,
}

/// Output a serializable result as one JSON document.
pub fn output_json<T: Serialize, W: Write>(result: &T, args: &TypofinderArgs, out: &mut W) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// Output the result of a scored file in the requested format and render
/// modes. Overwriting happens in either format.
pub fn output_scan<C, W>(
    finder: &mut TypoFinder<'_, C>,
    path: &Path,
    options: &ScanOptions,
    args: &TypofinderArgs,
    out: &mut W,
) -> Result<()>
where
    C: Corrector + ?Sized,
    W: Write,
{
    let Some(result) = finder.result() else {
        return Ok(());
    };

    match args.output_format {
        OutputFormat::Json => {
            output_json(
                &FileScanResult {
                    file: path.to_string_lossy().to_string(),
                    typos: result,
                },
                args,
                out,
            )?;
            let overwrite_only = ScanOptions {
                overwrite: options.overwrite,
                ..Default::default()
            };
            finder.render(&overwrite_only, out)
        }
        OutputFormat::Human => {
            if !result.is_empty() {
                writeln!(out, "Unknown word(s) has been found in file: '{}'", path.display())?;
            }
            finder.render(options, out)
        }
    }
}

/// Output the report of a training run.
///
/// In human format a dry run prints the words that would be added, one per
/// line; a real run prints nothing unless the output is verbose.
pub fn output_training_report<W: Write>(
    report: &TrainingReport,
    args: &TypofinderArgs,
    out: &mut W,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args, out),
        OutputFormat::Human => {
            if report.dry_run {
                for word in &report.new_words {
                    writeln!(out, "{word}")?;
                }
            } else if args.verbosity() > 1 {
                writeln!(out, "Corpus files: {}", report.corpus_files)?;
                writeln!(out, "Trained words: {}", report.trained_words)?;
                writeln!(out, "Added words: {}", report.added_words)?;
                writeln!(out, "Removed words: {}", report.removed.len())?;
                if !report.missing.is_empty() {
                    writeln!(out, "Missing words: {}", report.missing.join(", "))?;
                }
                writeln!(out, "Dictionary size: {}", report.dictionary_size)?;
                writeln!(out, "Saved: {}", if report.saved { "yes" } else { "no" })?;
            }
            Ok(())
        }
    }
}
