//! A provider that always stands pat.

use drawpoker_engine::cards::Card;
use drawpoker_engine::decision::DecisionProvider;
use drawpoker_engine::player::Player;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAI;

impl DecisionProvider for PassiveAI {
    fn choose(&self, _player: &Player, _peers: &[&Player]) -> Vec<Card> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "PassiveAI"
    }
}
