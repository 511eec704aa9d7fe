//! Baseline computer player for five-card draw.
//!
//! Keeps whatever part of the hand already scores and throws the rest back,
//! with a simple flush-draw check that looks at the cards other computers
//! have shown.

use drawpoker_engine::cards::{Card, Suit, all_suits};
use drawpoker_engine::decision::DecisionProvider;
use drawpoker_engine::hand::{Category, evaluate_hand};
use drawpoker_engine::player::Player;

/// Most cards a player may throw back in one exchange.
pub const MAX_DISCARDS: usize = 3;

/// Fewest live cards of a suit worth chasing a four-card flush for.
const MIN_FLUSH_OUTS: usize = 5;

/// Simple rule-based provider.
///
/// # Strategy
///
/// - Straight or better: stand pat
/// - Three of a kind: exchange the two odd cards
/// - Two pair: exchange the kicker
/// - One pair: exchange the three odd cards
/// - Nothing: draw one to a four-card flush when enough of the suit is still
///   live, otherwise exchange the three lowest cards
///
/// # Example
///
/// ```rust
/// use drawpoker_ai::baseline::BaselineAI;
/// use drawpoker_engine::decision::DecisionProvider;
/// use drawpoker_engine::player::Player;
///
/// let mut player = Player::computer("AI-1");
/// for c in ["2c", "2d", "7h", "9s", "Kc"] {
///     player.hand_mut().add_card(c.parse().unwrap(), true);
/// }
/// let discards = BaselineAI::new().choose(&player, &[]);
/// assert_eq!(discards.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Cards to exchange from `hand`, given the face-up cards on other seats.
    fn discards(hand: &[Card], visible: &[Card]) -> Vec<Card> {
        let strength = evaluate_hand(hand);
        let k = strength.kickers;
        match strength.category {
            Category::Straight
            | Category::Flush
            | Category::FullHouse
            | Category::FourOfAKind
            | Category::StraightFlush => Vec::new(),
            Category::ThreeOfAKind | Category::OnePair => outside_ranks(hand, &[k[0]]),
            Category::TwoPair => outside_ranks(hand, &[k[0], k[1]]),
            Category::HighCard => match flush_draw_discard(hand, visible) {
                Some(card) => vec![card],
                None => lowest(hand, MAX_DISCARDS),
            },
        }
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

fn outside_ranks(hand: &[Card], keep: &[u8]) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|c| !keep.contains(&(c.rank as u8)))
        .collect()
}

fn lowest(hand: &[Card], n: usize) -> Vec<Card> {
    let mut sorted = hand.to_vec();
    sorted.sort_by_key(|c| c.high_card_key());
    sorted.truncate(n);
    sorted
}

// The single off-suit card of a four-flush, if the draw is still live.
fn flush_draw_discard(hand: &[Card], visible: &[Card]) -> Option<Card> {
    let count = |suit: Suit| hand.iter().filter(|c| c.suit == suit).count();
    let suit = all_suits().into_iter().find(|&s| count(s) == 4)?;
    let seen = visible.iter().filter(|c| c.suit == suit).count();
    let outs = 13usize.saturating_sub(4 + seen);
    if outs < MIN_FLUSH_OUTS {
        return None;
    }
    hand.iter().copied().find(|c| c.suit != suit)
}

impl DecisionProvider for BaselineAI {
    fn choose(&self, player: &Player, peers: &[&Player]) -> Vec<Card> {
        let visible: Vec<Card> = peers
            .iter()
            .flat_map(|p| p.hand().held().iter())
            .filter(|h| !h.hidden)
            .map(|h| h.card)
            .collect();
        Self::discards(&player.hand().cards(), &visible)
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}
