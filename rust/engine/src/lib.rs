//! # drawpoker-engine: Five-Card Draw Round Engine
//!
//! Runs single rounds of five-card draw for up to four seats, human or
//! computer. A round admits players, deals five cards each, lets every player
//! exchange cards or pass exactly once, and then marks winners by hand
//! category, falling back to the highest single card when nobody holds a
//! combination.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - The [`deck::CardSource`] contract, a seeded ChaCha20 deck and a stacked deck
//! - [`hand`] - Hand classification and the per-player [`hand::Hand`]
//! - [`player`] - Human/computer players, actions and computer id minting
//! - [`decision`] - The [`decision::DecisionProvider`] seam for computer turns
//! - [`round`] - The round state machine and winner resolution
//! - [`logger`] - Round summaries and JSONL output
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_engine::player::GameOption;
//! use drawpoker_engine::round::Round;
//!
//! let mut round = Round::new(7);
//! round.open_lobby(2);
//! round.register_human("alice");
//! round.register_human("bob");
//! assert!(round.ready_to_start());
//! round.deal_initial_hands().unwrap();
//!
//! let ids: Vec<_> = round.players().iter().map(|p| p.id().clone()).collect();
//! for id in &ids {
//!     round.apply_action(id, GameOption::Pass, &[]).unwrap();
//! }
//! assert!(round.is_resolved());
//!
//! let winners = round.resolve_round().unwrap();
//! assert!(!winners.is_empty());
//! round.reset_round();
//! ```

pub mod cards;
pub mod decision;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod round;
