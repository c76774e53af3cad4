use rand::Rng;

use crate::action::Action;
use crate::bot::{Bot, fallback_action, with_declared_color};
use crate::state::GameStateView;

/// Easy difficulty: always the lowest legal hand index.
pub struct FirstLegalBot<R: Rng> {
    rng: R,
}

impl<R: Rng> FirstLegalBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for FirstLegalBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        match legal_actions
            .iter()
            .copied()
            .find(|a| matches!(a, Action::Play { .. }))
        {
            Some(action) => with_declared_color(state, action, &mut self.rng),
            None => fallback_action(legal_actions, &mut self.rng),
        }
    }
}
