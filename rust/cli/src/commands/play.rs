//! # Play Command
//!
//! Runs one or more rounds at the terminal. Human seats are prompted in seat
//! order on stdin; every other seat is filled with a computer player driven
//! by the configured decision provider.
//!
//! A human who enters `q` (or closes stdin) leaves the table. Mid-round their
//! seat passes to a computer. When the administrator leaves, the next human
//! takes over; with nobody left to take over, the table is abandoned.

use super::{load_config, validate_overrides, write_showdown};
use crate::error::CliError;
use crate::formatters::{format_hand, format_seat, format_slots};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_turn_input};
use drawpoker_ai::create_ai;
use drawpoker_engine::decision::DecisionProvider;
use drawpoker_engine::errors::GameError;
use drawpoker_engine::logger::{RoundLogger, RoundRecord};
use drawpoker_engine::player::PlayerId;
use drawpoker_engine::round::{AdminDropout, Round};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Command-line overrides for `play`; unset values come from the config.
#[derive(Debug, Clone, Default)]
pub struct PlaySettings {
    pub seats: Option<usize>,
    pub humans: usize,
    pub seed: Option<u64>,
    pub ai: Option<String>,
    pub rounds: Option<u32>,
    pub record: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every requested round was played
    Completed,
    /// The administrator left and no human remained to take over
    Abandoned,
}

enum TurnOutcome {
    Acted,
    Left,
}

pub fn handle_play_command(
    settings: PlaySettings,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<PlayOutcome, CliError> {
    let mut cfg = load_config(err)?;
    if let Some(seats) = settings.seats {
        cfg.seats = seats;
    }
    if let Some(ai) = settings.ai {
        cfg.ai = ai;
    }
    if let Some(rounds) = settings.rounds {
        cfg.rounds = rounds;
    }
    validate_overrides(&cfg, err)?;
    if settings.humans > cfg.seats {
        let msg = format!(
            "humans ({}) cannot exceed seats ({})",
            settings.humans, cfg.seats
        );
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let provider = create_ai(&cfg.ai)
        .ok_or_else(|| CliError::InvalidInput(format!("unknown ai '{}'", cfg.ai)))?;

    if settings.humans == 0 {
        ui::display_warning(err, "no human seats; every turn is played by the computer")?;
    }

    let seed = settings.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let mut logger = settings.record.map(RoundLogger::create).transpose()?;

    writeln!(
        out,
        "play: seats={} humans={} ai={} rounds={} seed={}",
        cfg.seats, settings.humans, cfg.ai, cfg.rounds, seed
    )?;

    let mut round = Round::new(seed);
    round.open_lobby(cfg.seats);
    for i in 1..=settings.humans {
        round.register_human(format!("P{}", i));
    }
    if !round.ready_to_start() {
        round.register_computer_fill();
    }

    let mut played = 0u32;
    for n in 1..=cfg.rounds {
        writeln!(out, "Round {}", n)?;
        round.deal_initial_hands()?;
        for p in round.players() {
            writeln!(out, "  {:<16} {}", format_seat(p), format_hand(p.hand(), false))?;
        }

        if play_turns(&mut round, provider.as_ref(), out, err, stdin)? == PlayOutcome::Abandoned {
            writeln!(out, "Table abandoned.")?;
            writeln!(out, "Rounds played: {}", played)?;
            return Ok(PlayOutcome::Abandoned);
        }

        round.reveal_all();
        round.resolve_round()?;
        write_showdown(&round, out)?;
        if let Some(logger) = logger.as_mut() {
            let record = RoundRecord::capture(logger.next_id(), Some(seed), round.players());
            logger.write(&record)?;
        }
        round.reset_round();
        played += 1;
    }

    writeln!(out, "Rounds played: {}", played)?;
    Ok(PlayOutcome::Completed)
}

/// Takes turns in seat order until everyone has acted. Seats handed to a
/// computer mid-round are played when their turn comes up.
fn play_turns(
    round: &mut Round,
    provider: &dyn DecisionProvider,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<PlayOutcome, CliError> {
    while let Some(player) = round.players().iter().find(|p| !p.has_acted()) {
        let id = player.id().clone();
        if player.is_computer() {
            let option = round.play_computer_turn(&id, provider)?;
            let hand = round
                .player(&id)
                .map(|p| format_hand(p.hand(), false))
                .unwrap_or_default();
            writeln!(out, "{}: {} {}", id, option, hand)?;
            continue;
        }

        match human_turn(round, &id, out, err, stdin)? {
            TurnOutcome::Acted => {}
            TurnOutcome::Left => {
                if leave_table(round, &id, out)? == PlayOutcome::Abandoned {
                    return Ok(PlayOutcome::Abandoned);
                }
            }
        }
    }
    Ok(PlayOutcome::Completed)
}

fn human_turn(
    round: &mut Round,
    id: &PlayerId,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<TurnOutcome, CliError> {
    loop {
        let hand = round
            .player(id)
            .ok_or_else(|| GameError::PlayerNotFound { id: id.to_string() })?
            .hand();
        let cards = hand.cards();
        writeln!(out, "{} hand: {}", id, format_slots(hand))?;
        write!(out, "Exchange which cards? (slots or codes, p=pass, q=quit): ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            return Ok(TurnOutcome::Left);
        };
        match parse_turn_input(&line, &cards) {
            ParseResult::Action(option, chosen) => {
                round.apply_action(id, option, &chosen)?;
                let hand = round
                    .player(id)
                    .map(|p| format_hand(p.hand(), true))
                    .unwrap_or_default();
                writeln!(out, "{}: {} {}", id, option, hand)?;
                return Ok(TurnOutcome::Acted);
            }
            ParseResult::Quit => return Ok(TurnOutcome::Left),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

fn leave_table(round: &mut Round, id: &PlayerId, out: &mut dyn Write) -> Result<PlayOutcome, CliError> {
    let seat = round.players().iter().position(|p| p.id() == id);
    match round.handle_admin_dropout(id) {
        AdminDropout::Abandoned => {
            writeln!(out, "{} left; no human remains to run the table", id)?;
            return Ok(PlayOutcome::Abandoned);
        }
        AdminDropout::Promoted { admin } => {
            writeln!(out, "{} left; {} is now admin", id, admin)?;
        }
        AdminDropout::NotAdmin => {
            round.deregister(id);
            writeln!(out, "{} left", id)?;
        }
    }
    if let Some(p) = seat.and_then(|i| round.players().get(i)) {
        writeln!(out, "Seat taken by {}", p.id())?;
    }
    Ok(PlayOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn play(settings: PlaySettings, input: &str) -> (Result<PlayOutcome, CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes().to_vec());
        let result = handle_play_command(settings, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn settings(seats: usize, humans: usize) -> PlaySettings {
        PlaySettings {
            seats: Some(seats),
            humans,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_single_human_passes() {
        let (result, out, _) = play(settings(2, 1), "p\n");
        assert_eq!(result.unwrap(), PlayOutcome::Completed);
        assert!(out.contains("play: seats=2 humans=1"));
        assert!(out.contains("P1: pass"));
        assert!(out.contains("AI-1243513: "));
        assert!(out.contains("Winners: "));
        assert!(out.contains("Rounds played: 1"));
    }

    #[test]
    #[serial]
    fn test_invalid_input_reprompts() {
        let (result, out, err) = play(settings(2, 1), "fold\n9\n1 2\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized input"));
        assert!(err.contains("out of range"));
        assert!(out.contains("P1: exchange"));
    }

    #[test]
    #[serial]
    fn test_admin_quit_promotes_next_human() {
        let (result, out, _) = play(settings(3, 2), "q\np\n");
        assert_eq!(result.unwrap(), PlayOutcome::Completed);
        assert!(out.contains("P1 left; P2 is now admin"));
        assert!(out.contains("Seat taken by AI-"));
        assert!(out.contains("P2 (admin)"));
        assert!(out.contains("Rounds played: 1"));
    }

    #[test]
    #[serial]
    fn test_lone_admin_eof_abandons_table() {
        let (result, out, _) = play(settings(2, 1), "");
        assert_eq!(result.unwrap(), PlayOutcome::Abandoned);
        assert!(out.contains("Table abandoned."));
        assert!(out.contains("Rounds played: 0"));
    }

    #[test]
    #[serial]
    fn test_non_admin_quit_hands_seat_to_computer() {
        let (result, out, _) = play(settings(2, 2), "p\nq\n");
        assert_eq!(result.unwrap(), PlayOutcome::Completed);
        assert!(out.contains("P2 left"));
        assert!(out.contains("Seat taken by AI-1243513"));
    }

    #[test]
    #[serial]
    fn test_rejects_more_humans_than_seats() {
        let (result, _, err) = play(settings(2, 3), "");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("cannot exceed seats"));
    }

    #[test]
    #[serial]
    fn test_multiple_rounds_keep_roster() {
        let s = PlaySettings {
            rounds: Some(3),
            ..settings(4, 1)
        };
        let (result, out, _) = play(s, "p\np\np\n");
        assert!(result.is_ok());
        assert_eq!(out.matches("Showdown:").count(), 3);
        assert!(out.contains("Rounds played: 3"));
        assert!(!out.contains("AI-1243516"));
    }

    #[test]
    #[serial]
    fn test_record_writes_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let s = PlaySettings {
            rounds: Some(2),
            record: Some(path.clone()),
            ..settings(2, 0)
        };
        let (result, _, err) = play(s, "");
        assert!(result.is_ok());
        assert!(err.contains("WARNING: no human seats"));

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<RoundRecord> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seed, Some(7));
        assert_eq!(records[0].seats.len(), 2);
        assert!(!records[0].winners.is_empty());
        assert!(records[1].round_id.ends_with("-000002"));
    }
}
