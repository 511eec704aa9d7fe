//! Input parsing for interactive turns.
//!
//! A human turn is one line of text: pass, quit, or the cards to exchange,
//! given either as 1-based slot numbers or as card codes such as `Td`.

use drawpoker_engine::cards::Card;
use drawpoker_engine::hand::HAND_SIZE;
use drawpoker_engine::player::GameOption;

/// Result of parsing one line of turn input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// An option plus the cards it applies to (empty for a pass)
    Action(GameOption, Vec<Card>),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a turn against the cards the player currently holds.
///
/// Accepts (case-insensitive):
/// - empty line, "p", "pass" or "stay" → Pass
/// - "q" or "quit" → Quit
/// - slot numbers and/or card codes, optionally prefixed by "x"/"exchange"/"hit"
///
/// Duplicate selections collapse into one.
///
/// # Example
///
/// ```rust
/// # use drawpoker_cli::validation::{parse_turn_input, ParseResult};
/// use drawpoker_engine::cards::Card;
/// use drawpoker_engine::player::GameOption;
///
/// let hand: Vec<Card> = ["2c", "5d", "9h", "Js", "Ac"]
///     .iter()
///     .map(|c| c.parse().unwrap())
///     .collect();
///
/// assert_eq!(
///     parse_turn_input("1 3", &hand),
///     ParseResult::Action(GameOption::Exchange, vec![hand[0], hand[2]])
/// );
/// assert_eq!(parse_turn_input("", &hand), ParseResult::Action(GameOption::Pass, vec![]));
/// assert_eq!(parse_turn_input("quit", &hand), ParseResult::Quit);
/// ```
pub fn parse_turn_input(input: &str, hand: &[Card]) -> ParseResult {
    let lowered = input.trim().to_lowercase();
    let mut parts: Vec<&str> = lowered
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    match parts.first().copied() {
        None | Some("p") | Some("pass") | Some("stay") if parts.len() <= 1 => {
            return ParseResult::Action(GameOption::Pass, Vec::new());
        }
        Some("q") | Some("quit") => return ParseResult::Quit,
        Some("x") | Some("exchange") | Some("hit") => {
            parts.remove(0);
        }
        _ => {}
    }

    if parts.is_empty() {
        return ParseResult::Invalid("Exchange requires at least one card".to_string());
    }

    let mut chosen: Vec<Card> = Vec::new();
    for part in parts {
        let card = match part.parse::<usize>() {
            Ok(slot) if (1..=HAND_SIZE).contains(&slot) => match hand.get(slot - 1) {
                Some(card) => *card,
                None => return ParseResult::Invalid(format!("No card in slot {}", slot)),
            },
            Ok(slot) => {
                return ParseResult::Invalid(format!(
                    "Slot {} out of range (1-{})",
                    slot, HAND_SIZE
                ));
            }
            Err(_) => match part.parse::<Card>() {
                Ok(card) if hand.contains(&card) => card,
                Ok(card) => return ParseResult::Invalid(format!("{} is not in your hand", card)),
                Err(_) => return ParseResult::Invalid(format!("Unrecognized input: {}", part)),
            },
        };
        if !chosen.contains(&card) {
            chosen.push(card);
        }
    }
    ParseResult::Action(GameOption::Exchange, chosen)
}
