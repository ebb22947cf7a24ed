//! Typofinder CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use typofinder::cli::args::*;
use typofinder::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = TypofinderArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}][{:>5}][{}]: {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
