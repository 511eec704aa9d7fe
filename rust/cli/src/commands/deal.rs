//! Deal command handler.
//!
//! Seats computer players only, deals one round, lets each of them take a
//! turn with the configured decision provider, and prints the showdown.
//! Supports an optional seed for deterministic dealing.

use super::{load_config, validate_overrides, write_showdown};
use crate::error::CliError;
use crate::formatters::{format_hand, format_seat};
use drawpoker_ai::create_ai;
use drawpoker_engine::round::Round;
use std::io::Write;

pub fn handle_deal_command(
    seats: Option<usize>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let mut cfg = load_config(err)?;
    if let Some(seats) = seats {
        cfg.seats = seats;
    }
    validate_overrides(&cfg, err)?;
    let provider = create_ai(&cfg.ai)
        .ok_or_else(|| CliError::InvalidInput(format!("unknown ai '{}'", cfg.ai)))?;

    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    writeln!(out, "deal: seats={} ai={} seed={}", cfg.seats, cfg.ai, seed)?;

    let mut round = Round::new(seed);
    round.open_lobby(cfg.seats);
    round.register_computer_fill();
    round.deal_initial_hands()?;
    for p in round.players() {
        writeln!(out, "Dealt {:<16} {}", format_seat(p), format_hand(p.hand(), true))?;
    }

    round.play_computer_turns(provider.as_ref())?;
    for p in round.players() {
        let action = p.last_action().map(|a| a.as_str()).unwrap_or("-");
        writeln!(
            out,
            "{:<22} {:<9} {}",
            format_seat(p),
            action,
            format_hand(p.hand(), false)
        )?;
    }

    round.reveal_all();
    round.resolve_round()?;
    write_showdown(&round, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn run_deal(seats: Option<usize>, seed: Option<u64>) -> (Result<(), CliError>, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_deal_command(seats, seed, &mut out, &mut err);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    #[serial]
    fn test_deal_is_deterministic_for_a_seed() {
        let (r1, a) = run_deal(Some(3), Some(42));
        let (r2, b) = run_deal(Some(3), Some(42));
        assert!(r1.is_ok() && r2.is_ok());
        assert_eq!(a, b);
        assert!(a.contains("seed=42"));
        assert_eq!(a.matches("Dealt ").count(), 3);
        assert!(a.contains("Winners: "));
    }

    #[test]
    #[serial]
    fn test_deal_rejects_too_many_seats() {
        let (result, _) = run_deal(Some(5), Some(1));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
