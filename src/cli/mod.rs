//! CLI module for tgcnc
//!
//! Provides command-line interface for:
//! - serve: HTTP server for the Mini App and admin panel
//! - bot: Telegram bot process
//! - calc: One-shot calculation from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{calc, calc_from_slice, run, run_bot, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_response};
