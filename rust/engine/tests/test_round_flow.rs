use std::collections::HashSet;

use drawpoker_engine::cards::Card;
use drawpoker_engine::deck::{CardSource, StackedDeck};
use drawpoker_engine::errors::GameError;
use drawpoker_engine::hand::HandStatus;
use drawpoker_engine::player::{GameOption, IdCounter, PlayerId};
use drawpoker_engine::round::{Round, RoundState};

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn full_table(seed: u64) -> Round {
    let mut round = Round::new(seed);
    round.open_lobby(4);
    round.register_human("alice");
    round.register_computer_fill();
    round
}

#[test]
fn deal_gives_five_hidden_cards_to_everyone() {
    let mut round = full_table(21);
    round.deal_initial_hands().unwrap();

    assert_eq!(round.state(), RoundState::Playing);
    assert_eq!(round.deck_remaining(), 52 - 5 * 4);

    let mut seen = HashSet::new();
    for player in round.players() {
        assert_eq!(player.hand().len(), 5);
        assert!(player.hand().held().iter().all(|h| h.hidden));
        for card in player.hand().cards() {
            assert!(seen.insert(card), "{} dealt twice", card);
        }
    }
}

#[test]
fn dealt_hands_are_sorted_by_rank() {
    let order = cards("Kd 2c 9h 2d Js");
    let mut round = Round::with_deck(StackedDeck::new(order), IdCounter::default());
    round.open_lobby(1);
    round.register_human("alice");
    round.deal_initial_hands().unwrap();
    assert_eq!(round.players()[0].hand().cards(), cards("2c 2d 9h Js Kd"));
}

#[test]
fn exchange_replaces_only_requested_cards_in_place() {
    let order = cards("2c 5d 8h Js Kd  Ah As Ad");
    let mut round = Round::with_deck(StackedDeck::new(order), IdCounter::default());
    round.open_lobby(1);
    round.register_human("alice");
    round.deal_initial_hands().unwrap();

    // 3s is not in the hand and is skipped
    round
        .apply_action(&id("alice"), GameOption::Exchange, &cards("5d 3s Js"))
        .unwrap();

    let alice = round.player(&id("alice")).unwrap();
    assert_eq!(alice.last_action(), Some(GameOption::Exchange));
    assert_eq!(alice.hand().cards(), cards("2c Ah 8h As Kd"));
    let hidden: Vec<bool> = alice.hand().held().iter().map(|h| h.hidden).collect();
    assert_eq!(hidden, vec![true, false, true, false, true]);
    assert_eq!(round.deck_remaining(), 1);
}

#[test]
fn pass_leaves_the_hand_alone() {
    let mut round = full_table(4);
    round.deal_initial_hands().unwrap();
    let before = round.player(&id("alice")).unwrap().hand().clone();
    round.apply_action(&id("alice"), GameOption::Pass, &[]).unwrap();
    let alice = round.player(&id("alice")).unwrap();
    assert_eq!(alice.hand(), &before);
    assert_eq!(alice.last_action(), Some(GameOption::Pass));
}

#[test]
fn acting_again_overwrites_the_option() {
    let mut round = full_table(4);
    round.deal_initial_hands().unwrap();
    round.apply_action(&id("alice"), GameOption::Pass, &[]).unwrap();
    round
        .apply_action(&id("alice"), GameOption::Exchange, &[])
        .unwrap();
    assert_eq!(
        round.player(&id("alice")).unwrap().last_action(),
        Some(GameOption::Exchange)
    );
}

#[test]
fn unknown_player_is_reported() {
    let mut round = full_table(4);
    round.deal_initial_hands().unwrap();
    assert_eq!(
        round.apply_action(&id("mallory"), GameOption::Pass, &[]),
        Err(GameError::PlayerNotFound {
            id: "mallory".to_string()
        })
    );
    assert!(round.reveal(&id("mallory")).is_err());
}

#[test]
fn is_resolved_needs_every_player() {
    let mut round = full_table(8);
    round.deal_initial_hands().unwrap();
    let ids: Vec<PlayerId> = round.players().iter().map(|p| p.id().clone()).collect();

    for pid in &ids[..3] {
        round.apply_action(pid, GameOption::Pass, &[]).unwrap();
        assert!(!round.is_resolved());
    }
    round.apply_action(&ids[3], GameOption::Pass, &[]).unwrap();
    assert!(round.is_resolved());
}

#[test]
fn next_to_act_follows_seat_order() {
    let mut round = Round::new(2);
    round.open_lobby(3);
    round.register_human("alice");
    round.register_human("bob");
    round.register_human("carol");
    round.deal_initial_hands().unwrap();

    assert_eq!(round.next_to_act().map(|p| p.id().clone()), Some(id("alice")));
    round.apply_action(&id("alice"), GameOption::Pass, &[]).unwrap();
    assert_eq!(round.next_to_act().map(|p| p.id().clone()), Some(id("bob")));
    round.apply_action(&id("carol"), GameOption::Pass, &[]).unwrap();
    assert_eq!(round.next_to_act().map(|p| p.id().clone()), Some(id("bob")));
    round.apply_action(&id("bob"), GameOption::Pass, &[]).unwrap();
    assert!(round.next_to_act().is_none());
}

#[test]
fn reveal_turns_cards_face_up() {
    let mut round = full_table(6);
    round.deal_initial_hands().unwrap();
    round.reveal(&id("alice")).unwrap();
    assert!(round.players()[0].hand().held().iter().all(|h| !h.hidden));
    assert!(round.players()[1].hand().held().iter().all(|h| h.hidden));

    round.reveal_all();
    assert!(round
        .players()
        .iter()
        .all(|p| p.hand().held().iter().all(|h| !h.hidden)));
}

#[test]
fn reset_clears_everything_but_the_roster() {
    let mut round = full_table(10);
    round.deal_initial_hands().unwrap();
    let ids: Vec<PlayerId> = round.players().iter().map(|p| p.id().clone()).collect();
    for pid in &ids {
        round.apply_action(pid, GameOption::Pass, &[]).unwrap();
    }
    round.resolve_round().unwrap();

    round.reset_round();
    assert_eq!(round.state(), RoundState::WaitingForPlayers);
    assert_eq!(round.players().len(), 4);
    assert_eq!(round.deck_remaining(), 52);
    for player in round.players() {
        assert!(player.hand().is_empty());
        assert_eq!(player.hand().status(), HandStatus::Undecided);
        assert!(player.last_action().is_none());
    }
}

#[test]
fn reset_works_from_any_state() {
    let mut fresh = Round::new(1);
    fresh.reset_round();
    assert_eq!(fresh.state(), RoundState::WaitingForPlayers);

    let mut lobby = Round::new(1);
    lobby.open_lobby(2);
    lobby.reset_round();
    assert_eq!(lobby.state(), RoundState::WaitingForPlayers);
}

#[test]
fn deal_runs_out_of_cards_loudly() {
    let mut deck = StackedDeck::new(cards("2c 3c 4c 5c 6c 7c"));
    assert_eq!(deck.remaining(), 6);
    deck.reset();
    let mut round = Round::with_deck(deck, IdCounter::default());
    round.open_lobby(2);
    round.register_human("alice");
    round.register_human("bob");
    assert_eq!(round.deal_initial_hands(), Err(GameError::DeckExhausted));

    // A short deck is detected before anything is dealt.
    assert_eq!(round.state(), RoundState::WaitingForPlayers);
    assert!(round.players().iter().all(|p| p.hand().is_empty()));
    assert_eq!(round.deck_remaining(), 6);
    assert_eq!(
        round.apply_action(&id("alice"), GameOption::Pass, &[]),
        Err(GameError::NotPlaying)
    );
}

#[test]
fn second_cycle_can_be_dealt_after_reset() {
    let mut round = full_table(77);
    round.deal_initial_hands().unwrap();
    round.reset_round();
    assert!(round.ready_to_start());
    round.deal_initial_hands().unwrap();
    assert!(round.players().iter().all(|p| p.hand().len() == 5));
}
