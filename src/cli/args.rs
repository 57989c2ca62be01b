//! CLI argument definitions using clap
//!
//! Commands:
//! - tgcnc serve [--port <port>] [--data-dir <dir>]
//! - tgcnc bot [--data-dir <dir>]
//! - tgcnc calc

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tgcnc - CNC cutting-mode assistant for Telegram
#[derive(Parser, Debug)]
#[command(name = "tgcnc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the HTTP server (Mini App, API and admin panel)
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Directory holding the JSON data files (overrides DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Start the Telegram bot
    Bot {
        /// Directory holding the JSON data files (overrides DATA_DIR)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Read a calculation request from stdin and print the result
    Calc,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
