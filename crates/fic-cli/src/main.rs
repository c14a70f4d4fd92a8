use fic_core::logging;

mod cli;

use crate::cli::{Cli, EXIT_FATAL};

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            std::process::exit(EXIT_FATAL);
        }
    };

    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("fic error: {:#}", err);
            std::process::exit(EXIT_FATAL);
        }
    }
}
