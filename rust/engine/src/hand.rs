use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Number of cards in a dealt hand.
pub const HAND_SIZE: usize = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    /// The "no combination" classification; every other category ranks above it.
    pub const BASELINE: Category = Category::HighCard;

    pub fn is_baseline(self) -> bool {
        self == Self::BASELINE
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Classifies a hand. Card order is irrelevant; a repeated card counts once
/// per occurrence and never panics.
pub fn classify(cards: &[Card]) -> Category {
    evaluate_hand(cards).category
}

pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = rank_val(c.rank);
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    if let Some(s) = flush_suit {
        let mut run = by_suit[s].clone();
        run.sort_unstable();
        run.dedup();
        if let Some(high) = detect_straight_high(&run) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    if let Some(s) = flush_suit {
        // by_suit[s] holds at least five entries here, duplicates included.
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    let uniq: Vec<u8> = (2..=14u8).filter(|&r| rank_counts[r as usize] > 0).collect();
    if let Some(high) = detect_straight_high(&uniq) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    let mut rest = singles.clone();
    rest.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(t) = trip_ranks.last().copied() {
        let mut k = [t, 0, 0, 0, 0];
        let mut remain: Vec<u8> = pair_ranks.iter().chain(singles.iter()).copied().collect();
        remain.sort_unstable_by(|a, b| b.cmp(a));
        k[1] = *remain.first().unwrap_or(&0);
        k[2] = *remain.get(1).unwrap_or(&0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let mut prs = pair_ranks.clone();
        prs.sort_unstable_by(|a, b| b.cmp(a));
        let k = [prs[0], prs[1], *rest.first().unwrap_or(&0), 0, 0];
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        for i in 0..3 {
            k[i + 1] = *rest.get(i).unwrap_or(&0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = *rest.get(i).unwrap_or(&0);
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}
fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.is_empty() {
        return None;
    }
    let mut v = sorted_unique_ranks.to_vec();
    v.sort_unstable();
    // Ace-low straight support: treat Ace as 1 additionally
    let mut w = v.clone();
    if v.binary_search(&14).is_ok() {
        w.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = 0u8;
    for i in 1..w.len() {
        if w[i] == w[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = w[i];
            }
        } else if w[i] != w[i - 1] {
            run = 1;
        }
    }
    if best_high == 0 {
        None
    } else {
        Some(best_high)
    }
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    match (trips.first(), trips.get(1), pairs.first()) {
        (Some(&t), Some(&p), _) => Some((t, p)),
        (Some(&t), None, Some(&p)) => Some((t, p)),
        _ => None,
    }
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14u8 {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

/// Outcome of a resolved round for one hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandStatus {
    #[default]
    Undecided,
    Winner,
    Loser,
}

/// A card in a hand together with its display visibility.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeldCard {
    pub card: Card,
    /// Hidden cards are not shown to opponents.
    pub hidden: bool,
}

/// The cards one player holds during a round.
///
/// Order only matters for display; classification ignores it. The cached
/// classification is dropped whenever the cards change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<HeldCard>,
    status: HandStatus,
    classification: Option<Category>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_card(&mut self, card: Card, hidden: bool) {
        self.cards.push(HeldCard { card, hidden });
        self.classification = None;
    }

    pub fn held(&self) -> &[HeldCard] {
        &self.cards
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().map(|h| h.card).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.position(card).is_some()
    }

    pub fn position(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|h| h.card == *card)
    }

    /// Swaps the card at `index` for `card`, keeping the slot. Returns the
    /// discarded card, or `None` when `index` is out of range.
    pub fn replace_at(&mut self, index: usize, card: Card, hidden: bool) -> Option<Card> {
        let slot = self.cards.get_mut(index)?;
        let old = std::mem::replace(slot, HeldCard { card, hidden });
        self.classification = None;
        Some(old.card)
    }

    pub fn sort_by_rank(&mut self) {
        self.cards.sort_by_key(|h| h.card.rank);
    }

    pub fn reveal(&mut self) {
        for held in &mut self.cards {
            held.hidden = false;
        }
    }

    /// Empties the hand and forgets its status.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.status = HandStatus::Undecided;
        self.classification = None;
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Classifies the hand, reusing the cached value while the cards are unchanged.
    pub fn classification(&mut self) -> Category {
        match self.classification {
            Some(category) => category,
            None => {
                let category = classify(&self.cards());
                self.classification = Some(category);
                category
            }
        }
    }

    pub fn cached_classification(&self) -> Option<Category> {
        self.classification
    }

    pub fn high_card(&self) -> Option<Card> {
        self.cards
            .iter()
            .map(|h| h.card)
            .max_by_key(|c| c.high_card_key())
    }
}
