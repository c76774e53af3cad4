use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::{Bot, fallback_action, with_declared_color};
use crate::state::GameStateView;

/// Normal difficulty: samples uniformly among the legal plays.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let plays: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(|a| matches!(a, Action::Play { .. }))
            .collect();
        match plays.choose(&mut self.rng).copied() {
            Some(action) => with_declared_color(state, action, &mut self.rng),
            None => fallback_action(legal_actions, &mut self.rng),
        }
    }
}
