//! Card and hand formatters for terminal display.
//!
//! Suits render as Unicode symbols where the terminal supports them and as
//! `c d h s` letters otherwise. Face-down cards render as `??` to everyone
//! except their owner.
//!
//! ## Example
//!
//! ```rust
//! use drawpoker_engine::cards::{Card, Rank, Suit};
//! use drawpoker_cli::formatters::format_card;
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! ```

use drawpoker_engine::cards::{Card, Rank, Suit};
use drawpoker_engine::hand::{Category, Hand, HandStatus};
use drawpoker_engine::player::Player;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "T",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
    .to_string()
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Formats a hand as `[c1 c2 c3 c4 c5]`.
///
/// With `owner_view` every card is shown; otherwise hidden cards print as `??`.
pub fn format_hand(hand: &Hand, owner_view: bool) -> String {
    let cards: Vec<String> = hand
        .held()
        .iter()
        .map(|held| {
            if held.hidden && !owner_view {
                "??".to_string()
            } else {
                format_card(&held.card)
            }
        })
        .collect();
    format!("[{}]", cards.join(" "))
}

/// Formats the owner's hand with 1-based slot numbers, e.g. `1:2♣ 2:5♦`.
pub fn format_slots(hand: &Hand) -> String {
    hand.held()
        .iter()
        .enumerate()
        .map(|(i, held)| format!("{}:{}", i + 1, format_card(&held.card)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_category(category: Category) -> &'static str {
    match category {
        Category::HighCard => "High Card",
        Category::OnePair => "One Pair",
        Category::TwoPair => "Two Pair",
        Category::ThreeOfAKind => "Three of a Kind",
        Category::Straight => "Straight",
        Category::Flush => "Flush",
        Category::FullHouse => "Full House",
        Category::FourOfAKind => "Four of a Kind",
        Category::StraightFlush => "Straight Flush",
    }
}

pub fn format_status(status: HandStatus) -> &'static str {
    match status {
        HandStatus::Winner => "WINNER",
        HandStatus::Loser => "LOSER",
        HandStatus::Undecided => "-",
    }
}

/// Short label for a seat: the id plus `(admin)` or `(cpu)` where relevant.
pub fn format_seat(player: &Player) -> String {
    if player.is_admin() {
        format!("{} (admin)", player.id())
    } else if player.is_computer() {
        format!("{} (cpu)", player.id())
    } else {
        player.id().to_string()
    }
}
