use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::GameError;
use crate::hand::Hand;

/// The single action each player takes per round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOption {
    /// Discard a chosen subset of held cards and draw replacements
    Exchange,
    /// Keep the hand as dealt
    Pass,
}

impl GameOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOption::Exchange => "exchange",
            GameOption::Pass => "pass",
        }
    }
}

impl fmt::Display for GameOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameOption {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exchange" | "hit" => Ok(GameOption::Exchange),
            "pass" | "stay" => Ok(GameOption::Pass),
            other => Err(GameError::InvalidAction(other.to_string())),
        }
    }
}

/// Stable identity of a seat occupant. For humans this is the session key the
/// transport layer hands in; computers get minted `AI-<n>` ids.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PlayerKind {
    Human { admin: bool },
    Computer,
}

/// A seat occupant: identity, variant, hand and the action taken this round.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    kind: PlayerKind,
    hand: Hand,
    last_action: Option<GameOption>,
}

impl Player {
    pub fn human(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            kind: PlayerKind::Human { admin: false },
            hand: Hand::new(),
            last_action: None,
        }
    }

    pub fn computer(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            kind: PlayerKind::Computer,
            hand: Hand::new(),
            last_action: None,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human { .. })
    }
    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer)
    }
    pub fn is_admin(&self) -> bool {
        matches!(self.kind, PlayerKind::Human { admin: true })
    }

    /// Only humans can hold the administrator flag; this is a no-op for computers.
    pub fn set_admin(&mut self, admin: bool) {
        if let PlayerKind::Human { admin: flag } = &mut self.kind {
            *flag = admin;
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn last_action(&self) -> Option<GameOption> {
        self.last_action
    }
    pub fn set_last_action(&mut self, action: Option<GameOption>) {
        self.last_action = action;
    }
    pub fn has_acted(&self) -> bool {
        self.last_action.is_some()
    }

    /// A computer that takes over this player's seat mid-round, inheriting a
    /// copy of the hand (cards, visibility, status) and the last action.
    pub fn to_substitute(&self, id: PlayerId) -> Player {
        Player {
            id,
            kind: PlayerKind::Computer,
            hand: self.hand.clone(),
            last_action: self.last_action,
        }
    }
}

/// Mints computer-player ids.
///
/// Clones share the same counter, so one instance can serve every table in
/// the process. Ids are never reused; the counter only resets with the process.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: Arc<AtomicU64>,
}

impl IdCounter {
    pub const DEFAULT_START: u64 = 1_243_512;

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn next_id(&self) -> PlayerId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        PlayerId(format!("AI-{}", n))
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::starting_at(Self::DEFAULT_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandStatus;

    #[test]
    fn only_humans_take_admin() {
        let mut h = Player::human("s-1");
        let mut c = Player::computer("AI-1");
        h.set_admin(true);
        c.set_admin(true);
        assert!(h.is_admin());
        assert!(!c.is_admin());
    }

    #[test]
    fn substitute_copies_hand_by_value() {
        let mut h = Player::human("s-1");
        h.hand_mut().add_card("As".parse().unwrap(), true);
        h.hand_mut().set_status(HandStatus::Loser);
        h.set_last_action(Some(GameOption::Pass));

        let mut sub = h.to_substitute(PlayerId::new("AI-9"));
        assert!(sub.is_computer());
        assert_eq!(sub.hand(), h.hand());
        assert_eq!(sub.last_action(), Some(GameOption::Pass));

        sub.hand_mut().clear();
        assert_eq!(h.hand().len(), 1);
    }

    #[test]
    fn counter_is_shared_between_clones() {
        let a = IdCounter::starting_at(10);
        let b = a.clone();
        assert_eq!(a.next_id().as_str(), "AI-11");
        assert_eq!(b.next_id().as_str(), "AI-12");
    }

    #[test]
    fn game_option_parsing() {
        assert_eq!("exchange".parse::<GameOption>(), Ok(GameOption::Exchange));
        assert_eq!(" PASS ".parse::<GameOption>(), Ok(GameOption::Pass));
        assert!(matches!(
            "fold".parse::<GameOption>(),
            Err(GameError::InvalidAction(_))
        ));
    }
}
