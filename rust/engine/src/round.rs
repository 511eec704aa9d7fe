use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::{CardSource, Deck};
use crate::decision::DecisionProvider;
use crate::errors::GameError;
use crate::hand::{HandStatus, HAND_SIZE};
use crate::player::{GameOption, IdCounter, Player, PlayerId};

/// Seats at a table when no lobby size was configured.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No lobby opened yet
    WaitingForAdmin,
    /// Lobby open, seats filling
    WaitingForPlayers,
    /// Hands dealt, turns in progress
    Playing,
}

/// What happened when the administrator left.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AdminDropout {
    /// The named player does not hold the administrator flag
    NotAdmin,
    /// Another human took over as administrator and the old one was removed
    /// (or replaced by a computer while playing)
    Promoted { admin: PlayerId },
    /// No human was left to take over; the table was cleared
    Abandoned,
}

/// One game table: the roster, the round state and the deck.
///
/// Every mutation takes `&mut self`; a table is meant to be driven by a single
/// owner. Computer ids come from an [`IdCounter`] that may be shared between
/// tables.
///
/// # Examples
///
/// ```
/// use drawpoker_engine::round::{Round, RoundState};
///
/// let mut round = Round::new(42);
/// round.open_lobby(2);
/// assert!(round.register_human("alice"));
/// assert!(round.register_computer_fill());
/// assert!(round.ready_to_start());
///
/// round.deal_initial_hands().expect("deal");
/// assert_eq!(round.state(), RoundState::Playing);
/// assert!(round.players().iter().all(|p| p.hand().len() == 5));
/// ```
#[derive(Debug)]
pub struct Round<D = Deck> {
    players: Vec<Player>,
    state: RoundState,
    max_players: Option<usize>,
    deck: D,
    ids: IdCounter,
}

impl Round<Deck> {
    pub fn new(seed: u64) -> Self {
        Self::with_deck(Deck::new_with_seed(seed), IdCounter::default())
    }
}

impl<D: CardSource> Round<D> {
    pub fn with_deck(deck: D, ids: IdCounter) -> Self {
        Self {
            players: Vec::with_capacity(DEFAULT_MAX_PLAYERS),
            state: RoundState::WaitingForAdmin,
            max_players: None,
            deck,
            ids,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }
    pub fn is_playing(&self) -> bool {
        self.state == RoundState::Playing
    }
    pub fn is_waiting_for_players(&self) -> bool {
        self.state == RoundState::WaitingForPlayers
    }

    /// Seats for the current cycle.
    pub fn capacity(&self) -> usize {
        self.max_players.unwrap_or(DEFAULT_MAX_PLAYERS)
    }

    /// Players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn admin(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_admin())
    }

    pub fn humans(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_human()).collect()
    }

    pub fn computers(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_computer()).collect()
    }

    pub fn is_human_registered(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| p.is_human() && p.id() == id)
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    fn index_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn find_index(&self, id: &PlayerId) -> Result<usize, GameError> {
        self.index_of(id).ok_or_else(|| GameError::PlayerNotFound {
            id: id.to_string(),
        })
    }

    /// Seats a human. The first human into an empty roster becomes administrator.
    /// Returns false when the id is already seated.
    pub fn register_human(&mut self, id: impl Into<PlayerId>) -> bool {
        let id = id.into();
        if self.index_of(&id).is_some() {
            warn!(player = %id, "already registered");
            return false;
        }
        let mut player = Player::human(id);
        if self.players.is_empty() {
            info!(player = %player.id(), "first player becomes admin");
            player.set_admin(true);
        }
        info!(player = %player.id(), "registered human");
        self.players.push(player);
        true
    }

    /// Fills every open seat with a computer player in one call.
    /// Returns false when no seat is open.
    pub fn register_computer_fill(&mut self) -> bool {
        let capacity = self.capacity();
        if self.players.len() >= capacity {
            warn!(capacity, "max players already reached");
            return false;
        }
        while self.players.len() < capacity {
            let id = self.ids.next_id();
            info!(player = %id, "adding computer player");
            self.players.push(Player::computer(id));
        }
        true
    }

    /// Hands a human's seat to a fresh computer player, which inherits a copy
    /// of the hand, its status and the last action.
    ///
    /// Refuses (returns false, changes nothing) for the administrator and for
    /// ids that are not seated humans.
    pub fn replace_with_computer(&mut self, id: &PlayerId) -> bool {
        let Some(index) = self
            .players
            .iter()
            .position(|p| p.is_human() && p.id() == id)
        else {
            warn!(player = %id, "no human to replace");
            return false;
        };
        if self.players[index].is_admin() {
            info!(player = %id, "refusing to replace the administrator");
            return false;
        }
        let substitute = self.players[index].to_substitute(self.ids.next_id());
        info!(player = %id, substitute = %substitute.id(), "replaced human with computer");
        self.players[index] = substitute;
        true
    }

    /// Handles a player leaving.
    ///
    /// While playing, a seated human is replaced by a computer and the result
    /// of [`Round::replace_with_computer`] is returned; unknown ids return true.
    /// Otherwise the id is removed and the return value reports whether it was
    /// absent to begin with, i.e. whether the caller has nothing left to do.
    /// An administrator leaves through [`Round::handle_admin_dropout`], so a
    /// lone administrator abandons the table.
    pub fn deregister(&mut self, id: &PlayerId) -> bool {
        if self.is_playing() {
            if self.is_human_registered(id) {
                info!(player = %id, "replacing with a computer before removal");
                return self.replace_with_computer(id);
            }
            return true;
        }
        match self.index_of(id) {
            Some(index) if self.players[index].is_admin() => {
                info!(player = %id, "administrator deregistering");
                self.handle_admin_dropout(id);
                false
            }
            Some(index) => {
                self.players.remove(index);
                info!(player = %id, "deregistered");
                false
            }
            None => true,
        }
    }

    /// Removes every computer player. Returns whether any were removed.
    pub fn remove_all_computers(&mut self) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.is_human());
        let removed = before - self.players.len();
        if removed > 0 {
            info!(removed, "removed computer players");
        }
        removed > 0
    }

    /// Resolves an administrator leaving the table.
    ///
    /// The next human in seat order (wrapping around) becomes administrator;
    /// the old administrator is then replaced by a computer while playing, or
    /// removed otherwise. With no other human left the table is abandoned:
    /// the roster is cleared and the state returns to `WaitingForAdmin`.
    pub fn handle_admin_dropout(&mut self, id: &PlayerId) -> AdminDropout {
        let Some(index) = self.index_of(id).filter(|&i| self.players[i].is_admin()) else {
            return AdminDropout::NotAdmin;
        };
        self.players[index].set_admin(false);
        let Some(admin) = self.promote_from(index + 1, id) else {
            warn!(player = %id, "administrator left with no human to take over");
            self.abandon();
            return AdminDropout::Abandoned;
        };
        if self.is_playing() {
            self.replace_with_computer(id);
        } else {
            self.players.retain(|p| p.id() != id);
        }
        AdminDropout::Promoted { admin }
    }

    // Grants admin to the first human seated at or after `seat`, wrapping,
    // skipping the player who is leaving.
    fn promote_from(&mut self, seat: usize, leaving: &PlayerId) -> Option<PlayerId> {
        let n = self.players.len();
        let next = (0..n).map(|offset| (seat + offset) % n).find(|&i| {
            let p = &self.players[i];
            p.is_human() && p.id() != leaving
        })?;
        self.players[next].set_admin(true);
        let id = self.players[next].id().clone();
        info!(player = %id, "promoted to admin");
        Some(id)
    }

    fn abandon(&mut self) {
        self.players.clear();
        self.max_players = None;
        self.deck.reset();
        self.state = RoundState::WaitingForAdmin;
        info!("table abandoned");
    }

    /// Opens the lobby for `seat_count` seats; counts outside 1..=4 fall back
    /// to the default of 4.
    pub fn open_lobby(&mut self, seat_count: usize) {
        let seats = if (1..=DEFAULT_MAX_PLAYERS).contains(&seat_count) {
            seat_count
        } else {
            DEFAULT_MAX_PLAYERS
        };
        self.max_players = Some(seats);
        self.state = RoundState::WaitingForPlayers;
        info!(seats, "prepared new round");
    }

    pub fn ready_to_start(&self) -> bool {
        let required = self.capacity();
        debug!(current = self.players.len(), required, "checking roster");
        self.players.len() == required
    }

    /// Deals five face-down cards to every seat and moves to `Playing`.
    /// Each hand is sorted by rank for display.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyRoster`] with nobody seated, [`GameError::DeckExhausted`]
    /// if the deck runs dry.
    pub fn deal_initial_hands(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        let needed = HAND_SIZE * self.players.len();
        if self.deck.remaining() < needed {
            warn!(needed, remaining = self.deck.remaining(), "not enough cards to deal");
            return Err(GameError::DeckExhausted);
        }
        info!(players = self.players.len(), "dealing initial hands");
        for player in &mut self.players {
            let hand = player.hand_mut();
            hand.clear();
            for _ in 0..HAND_SIZE {
                hand.add_card(self.deck.draw()?, true);
            }
            hand.sort_by_rank();
            debug!(player = %player.id(), "dealt hand");
        }
        self.state = RoundState::Playing;
        Ok(())
    }

    /// True once every seated player has an action recorded.
    pub fn is_resolved(&self) -> bool {
        let pending = self.pending();
        if pending > 0 {
            debug!(pending, "players still need to act");
        }
        pending == 0
    }

    fn pending(&self) -> usize {
        self.players.iter().filter(|p| !p.has_acted()).count()
    }

    /// Turn order: the first human, in seat order, who has not acted yet.
    /// Computers are driven separately by [`Round::play_computer_turns`].
    pub fn next_to_act(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human() && !p.has_acted())
    }

    /// Records `option` for the player and applies it.
    ///
    /// For [`GameOption::Exchange`] every card of `chosen` found in the hand is
    /// swapped in place for a freshly drawn, face-up card; cards not in the
    /// hand are skipped. Acting again overwrites the recorded option.
    ///
    /// # Errors
    ///
    /// [`GameError::NotPlaying`] before hands are dealt,
    /// [`GameError::PlayerNotFound`] for unknown ids, and
    /// [`GameError::DeckExhausted`] if a replacement cannot be drawn.
    pub fn apply_action(
        &mut self,
        id: &PlayerId,
        option: GameOption,
        chosen: &[Card],
    ) -> Result<(), GameError> {
        if !self.is_playing() {
            return Err(GameError::NotPlaying);
        }
        let index = self.find_index(id)?;
        let player = &mut self.players[index];
        info!(player = %id, %option, "performing option");
        match option {
            GameOption::Exchange => {
                let mut slots: Vec<usize> = Vec::with_capacity(chosen.len());
                for card in chosen {
                    match player.hand().position(card) {
                        Some(slot) if !slots.contains(&slot) => slots.push(slot),
                        Some(_) => {}
                        None => debug!(player = %id, %card, "card not in hand, skipping"),
                    }
                }
                // Nothing changes unless every replacement can be drawn.
                if self.deck.remaining() < slots.len() {
                    warn!(player = %id, wanted = slots.len(), "not enough cards to exchange");
                    return Err(GameError::DeckExhausted);
                }
                for slot in slots {
                    let drawn = self.deck.draw()?;
                    if let Some(discarded) = player.hand_mut().replace_at(slot, drawn, false) {
                        debug!(player = %id, %discarded, %drawn, "exchanged card");
                    }
                }
            }
            GameOption::Pass => {
                debug!(player = %id, "passing, hand unchanged");
            }
        }
        player.set_last_action(Some(option));
        Ok(())
    }

    /// Turns every card in the player's hand face up.
    pub fn reveal(&mut self, id: &PlayerId) -> Result<(), GameError> {
        let index = self.find_index(id)?;
        self.players[index].hand_mut().reveal();
        debug!(player = %id, "revealed cards");
        Ok(())
    }

    pub fn reveal_all(&mut self) {
        for player in &mut self.players {
            player.hand_mut().reveal();
        }
    }

    /// Lets `provider` decide for one computer player and applies the result:
    /// a non-empty choice is an exchange, an empty one a pass.
    pub fn play_computer_turn(
        &mut self,
        id: &PlayerId,
        provider: &dyn DecisionProvider,
    ) -> Result<GameOption, GameError> {
        let player = self
            .players
            .iter()
            .find(|p| p.is_computer() && p.id() == id)
            .ok_or_else(|| GameError::PlayerNotFound { id: id.to_string() })?;
        let peers: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.is_computer() && p.id() != id)
            .collect();
        let choice = provider.choose(player, &peers);
        let option = if choice.is_empty() {
            GameOption::Pass
        } else {
            GameOption::Exchange
        };
        info!(player = %id, provider = provider.name(), %option, discards = choice.len(), "computer decided");
        self.apply_action(id, option, &choice)?;
        Ok(option)
    }

    /// Plays, in seat order, every computer that has not acted yet.
    /// Returns how many turns were played.
    pub fn play_computer_turns(
        &mut self,
        provider: &dyn DecisionProvider,
    ) -> Result<usize, GameError> {
        let waiting: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.is_computer() && !p.has_acted())
            .map(|p| p.id().clone())
            .collect();
        for id in &waiting {
            self.play_computer_turn(id, provider)?;
        }
        Ok(waiting.len())
    }

    /// Marks every hand WINNER or LOSER and returns the winners in seat order.
    ///
    /// The best classification wins; all players sharing it win together,
    /// without kicker comparison. When nobody beats the baseline, the single
    /// highest card on the table decides (rank, then suit), and whoever holds
    /// that card wins.
    ///
    /// # Errors
    ///
    /// [`GameError::EmptyRoster`], [`GameError::RoundNotResolved`] while a
    /// player has not acted, [`GameError::HandNotDealt`] for a hand that is
    /// not a full five cards.
    pub fn resolve_round(&mut self) -> Result<Vec<PlayerId>, GameError> {
        if self.players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        let pending = self.pending();
        if pending > 0 {
            return Err(GameError::RoundNotResolved { pending });
        }
        if let Some(p) = self.players.iter().find(|p| p.hand().len() != HAND_SIZE) {
            return Err(GameError::HandNotDealt {
                id: p.id().to_string(),
            });
        }

        let mut best = None;
        for player in &mut self.players {
            let category = player.hand_mut().classification();
            debug!(player = %player.id(), ?category, "classified hand");
            best = best.max(Some(category));
        }
        let Some(best) = best else {
            return Err(GameError::EmptyRoster);
        };

        let winners: Vec<PlayerId> = if !best.is_baseline() {
            info!(?best, "best combination wins");
            self.players
                .iter()
                .filter(|p| p.hand().cached_classification() == Some(best))
                .map(|p| p.id().clone())
                .collect()
        } else {
            let top = self
                .players
                .iter()
                .filter_map(|p| p.hand().high_card())
                .max_by_key(|c| c.high_card_key())
                .ok_or(GameError::EmptyRoster)?;
            info!(card = %top, "no combinations, highest card wins");
            self.players
                .iter()
                .filter(|p| p.hand().contains(&top))
                .map(|p| p.id().clone())
                .collect()
        };

        for player in &mut self.players {
            let status = if winners.contains(player.id()) {
                HandStatus::Winner
            } else {
                HandStatus::Loser
            };
            player.hand_mut().set_status(status);
            info!(player = %player.id(), ?status, "round result");
        }
        Ok(winners)
    }

    /// Players marked WINNER by the last resolution.
    pub fn winners(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.hand().status() == HandStatus::Winner)
            .collect()
    }

    /// Clears every hand and action, restores a full shuffled deck and
    /// reopens the table. The roster is kept.
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.hand_mut().clear();
            player.set_last_action(None);
        }
        self.deck.reset();
        self.state = RoundState::WaitingForPlayers;
        info!("round reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::StackedDeck;

    fn stacked(s: &str) -> Round<StackedDeck> {
        let order = s.split_whitespace().map(|c| c.parse().unwrap()).collect();
        Round::with_deck(StackedDeck::new(order), IdCounter::starting_at(0))
    }

    #[test]
    fn lobby_clamps_out_of_range_seat_counts() {
        let mut round = Round::new(1);
        round.open_lobby(0);
        assert_eq!(round.capacity(), 4);
        round.open_lobby(7);
        assert_eq!(round.capacity(), 4);
        round.open_lobby(3);
        assert_eq!(round.capacity(), 3);
        assert!(round.is_waiting_for_players());
    }

    #[test]
    fn capacity_defaults_before_lobby() {
        let round = Round::new(1);
        assert_eq!(round.state(), RoundState::WaitingForAdmin);
        assert_eq!(round.capacity(), DEFAULT_MAX_PLAYERS);
    }

    #[test]
    fn apply_action_requires_dealt_round() {
        let mut round = Round::new(1);
        round.register_human("a");
        let err = round
            .apply_action(&PlayerId::from("a"), GameOption::Pass, &[])
            .unwrap_err();
        assert_eq!(err, GameError::NotPlaying);
    }

    #[test]
    fn exchange_surfaces_deck_exhaustion() {
        let mut round = stacked("2c 3c 4c 5c 7d");
        round.register_human("a");
        round.deal_initial_hands().unwrap();
        let err = round
            .apply_action(
                &PlayerId::from("a"),
                GameOption::Exchange,
                &["2c".parse().unwrap()],
            )
            .unwrap_err();
        assert_eq!(err, GameError::DeckExhausted);
    }

    #[test]
    fn failed_exchange_leaves_player_and_hand_untouched() {
        let mut round = stacked("2c 3c 4c 5c 7d 8d");
        round.register_human("a");
        round.deal_initial_hands().unwrap();
        let a = PlayerId::from("a");
        let before = round.player(&a).unwrap().hand().cards();

        let err = round
            .apply_action(
                &a,
                GameOption::Exchange,
                &["2c".parse().unwrap(), "3c".parse().unwrap()],
            )
            .unwrap_err();

        assert_eq!(err, GameError::DeckExhausted);
        assert_eq!(round.player(&a).unwrap().last_action(), None);
        assert_eq!(round.player(&a).unwrap().hand().cards(), before);
        assert!(!round.is_resolved());
        assert_eq!(round.deck_remaining(), 1);
        assert_eq!(
            round.resolve_round(),
            Err(GameError::RoundNotResolved { pending: 1 })
        );
    }

    #[test]
    fn repeated_card_in_exchange_draws_once() {
        let mut round = stacked("2c 3c 4c 5c 7d 8d");
        round.register_human("a");
        round.deal_initial_hands().unwrap();
        let a = PlayerId::from("a");
        let two: Card = "2c".parse().unwrap();
        round
            .apply_action(&a, GameOption::Exchange, &[two, two])
            .unwrap();
        assert_eq!(round.deck_remaining(), 0);
        assert!(round.player(&a).unwrap().hand().contains(&"8d".parse().unwrap()));
    }

    #[test]
    fn deal_with_empty_roster_fails() {
        let mut round = Round::new(1);
        assert_eq!(round.deal_initial_hands(), Err(GameError::EmptyRoster));
    }

    #[test]
    fn promote_wraps_around_the_table() {
        let mut round = Round::new(1);
        round.register_human("a");
        round.register_human("b");
        round.register_human("c");
        // admin is seat 0; next human after seat 2 wraps to seat 0 then 1
        round.players[0].set_admin(false);
        round.players[2].set_admin(true);
        let promoted = round.handle_admin_dropout(&PlayerId::from("c"));
        assert_eq!(
            promoted,
            AdminDropout::Promoted {
                admin: PlayerId::from("a")
            }
        );
        assert!(round.player(&PlayerId::from("c")).is_none());
        assert!(round.player(&PlayerId::from("a")).unwrap().is_admin());
    }
}
