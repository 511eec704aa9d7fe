use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted: no cards left to draw")]
    DeckExhausted,
    #[error("Round has no players")]
    EmptyRoster,
    #[error("No player registered as {id}")]
    PlayerNotFound { id: String },
    #[error("Player {id} has no dealt hand")]
    HandNotDealt { id: String },
    #[error("Round is not resolved: {pending} player(s) still to act")]
    RoundNotResolved { pending: usize },
    #[error("Round is not in progress")]
    NotPlaying,
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
}
