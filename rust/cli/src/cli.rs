//! Command-line surface of the `drawpoker` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "drawpoker",
    version,
    about = "Five-card draw at a table of up to four seats"
)]
pub struct DrawpokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play rounds at the terminal; open seats go to computer players
    Play {
        /// Seats at the table (1-4)
        #[arg(long)]
        seats: Option<usize>,
        /// Human players, prompted in seat order on stdin
        #[arg(long, default_value_t = 1)]
        humans: usize,
        /// Deck seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,
        /// Decision provider for computer seats
        #[arg(long)]
        ai: Option<String>,
        /// Number of rounds to play
        #[arg(long)]
        rounds: Option<u32>,
        /// Append a JSONL summary of each round to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Deal and resolve one all-computer round
    Deal {
        /// Seats at the table (1-4)
        #[arg(long)]
        seats: Option<usize>,
        /// Deck seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}
