use std::collections::HashSet;

use drawpoker_engine::cards::Card;
use drawpoker_engine::deck::{CardSource, Deck, StackedDeck};
use drawpoker_engine::errors::GameError;

#[test]
fn deck_has_52_unique_cards_then_exhausts() {
    let mut deck = Deck::new_with_seed(42);
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
}

#[test]
fn reset_restores_a_full_deck() {
    let mut deck = Deck::new_with_seed(3);
    for _ in 0..30 {
        deck.draw().unwrap();
    }
    deck.reset();
    assert_eq!(deck.remaining(), 52);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    let a: Vec<Card> = (0..10).map(|_| d1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| d2.draw().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn stacked_deck_deals_in_order_and_restarts() {
    let order: Vec<Card> = ["As", "Kd", "2c"].iter().map(|c| c.parse().unwrap()).collect();
    let mut deck = StackedDeck::new(order.clone());
    assert_eq!(deck.draw().unwrap(), order[0]);
    assert_eq!(deck.draw().unwrap(), order[1]);
    assert_eq!(deck.remaining(), 1);
    deck.reset();
    assert_eq!(deck.draw().unwrap(), order[0]);
}
