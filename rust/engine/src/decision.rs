use crate::cards::Card;
use crate::player::Player;

/// Picks the cards a computer player wants to exchange.
///
/// `peers` are the other computer players at the table. An empty result
/// means the player passes.
pub trait DecisionProvider: Send + Sync {
    fn choose(&self, player: &Player, peers: &[&Player]) -> Vec<Card>;

    fn name(&self) -> &str;
}
