//! # drawpoker CLI Library
//!
//! Command-line front end for the drawpoker round engine: play rounds at the
//! terminal, deal a computer-only round for inspection, or show the resolved
//! configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `play`: Play rounds, humans on stdin against computer seats
//! - `deal`: Deal and resolve one all-computer round
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, DrawpokerCli};
use commands::{
    PlayOutcome, PlaySettings, handle_cfg_command, handle_deal_command, handle_play_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a table is abandoned
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["drawpoker", "deal", "--seed", "42"];
/// let code = drawpoker_cli::run(args, &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match DrawpokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    if write_usage(err, &e.to_string(), COMMANDS).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err).map(|()| exit_code::SUCCESS),
        Commands::Deal { seats, seed } => {
            handle_deal_command(seats, seed, out, err).map(|()| exit_code::SUCCESS)
        }
        Commands::Play {
            seats,
            humans,
            seed,
            ai,
            rounds,
            record,
        } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            let settings = PlaySettings {
                seats,
                humans,
                seed,
                ai,
                rounds,
                record,
            };
            handle_play_command(settings, out, err, &mut stdin_lock).map(|outcome| match outcome {
                PlayOutcome::Completed => exit_code::SUCCESS,
                PlayOutcome::Abandoned => exit_code::INTERRUPTED,
            })
        }
    };

    match result {
        Ok(code) => code,
        // Config and input errors were already reported by the handler.
        Err(CliError::Config(_)) | Err(CliError::InvalidInput(_)) => exit_code::ERROR,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_msg: &str, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "{}", clap_msg)?;
    writeln!(err)?;
    writeln!(err, "drawpoker - five-card draw")?;
    writeln!(err, "Usage: drawpoker <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: drawpoker --help")
}
