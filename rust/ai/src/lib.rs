//! # drawpoker-ai: Computer Players for Five-Card Draw
//!
//! Decision providers that tell the round engine which cards a computer
//! player wants to exchange. Every provider implements
//! [`drawpoker_engine::decision::DecisionProvider`].
//!
//! ## Core Components
//!
//! - [`baseline`] - Rule-based exchanges built on hand classification
//! - [`passive`] - Never exchanges; useful as a control
//! - [`create_ai`] - Factory function for creating providers by name
//!
//! ## Quick Start
//!
//! ```rust
//! use drawpoker_ai::create_ai;
//! use drawpoker_engine::round::Round;
//!
//! let ai = create_ai("baseline").expect("known ai");
//!
//! let mut round = Round::new(42);
//! round.open_lobby(3);
//! round.register_computer_fill();
//! round.deal_initial_hands().expect("deal");
//!
//! let played = round.play_computer_turns(ai.as_ref()).expect("turns");
//! assert_eq!(played, 3);
//! assert!(round.is_resolved());
//! ```

use drawpoker_engine::decision::DecisionProvider;

pub mod baseline;
pub mod passive;

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["baseline", "passive"];

/// Factory function to create decision providers by type string.
///
/// # Arguments
///
/// * `ai_type` - String identifier for the provider (see [`AI_TYPES`])
///
/// # Returns
///
/// A boxed provider, or `None` for an unknown name.
///
/// # Example
///
/// ```rust
/// use drawpoker_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn DecisionProvider>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "passive" => Some(Box::new(passive::PassiveAI)),
        _ => None,
    }
}
