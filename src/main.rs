//! tgcnc CLI entry point
//!
//! Parsing, configuration and dispatch live in the CLI module; this only
//! reports the error and exits non-zero on failure.

use tgcnc::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
