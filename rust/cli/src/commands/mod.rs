//! Command handler modules for the drawpoker CLI.
//!
//! Each subcommand lives in its own file and exposes one
//! `handle_COMMAND_command(...) -> Result<_, CliError>` function. Output
//! streams are passed in as `&mut dyn Write` so tests can capture them.

pub mod cfg;
pub mod deal;
pub mod play;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{PlayOutcome, PlaySettings, handle_play_command};

use crate::config::{self, Config};
use crate::error::CliError;
use crate::formatters::{format_category, format_hand, format_seat, format_status};
use crate::ui;
use drawpoker_engine::deck::CardSource;
use drawpoker_engine::round::Round;
use std::io::Write;

/// Loads the configuration, reporting failures on `err`.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(e.to_string()))
        }
    }
}

/// Checks a config after command-line overrides were applied.
pub(crate) fn validate_overrides(cfg: &Config, err: &mut dyn Write) -> Result<(), CliError> {
    if let Err(e) = config::validate(cfg) {
        ui::write_error(err, &e.to_string())?;
        return Err(CliError::InvalidInput(e.to_string()));
    }
    Ok(())
}

/// Prints every seat face up with its classification and result, then the winners.
pub(crate) fn write_showdown<D: CardSource>(
    round: &Round<D>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(out, "Showdown:")?;
    for p in round.players() {
        let category = p
            .hand()
            .cached_classification()
            .map(format_category)
            .unwrap_or("-");
        writeln!(
            out,
            "  {:<16} {:<22} {:<16} {}",
            format_seat(p),
            format_hand(p.hand(), false),
            category,
            format_status(p.hand().status())
        )?;
    }
    let winners: Vec<String> = round.winners().iter().map(|p| p.id().to_string()).collect();
    writeln!(out, "Winners: {}", winners.join(", "))?;
    Ok(())
}
