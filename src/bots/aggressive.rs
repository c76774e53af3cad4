use rand::Rng;

use crate::action::Action;
use crate::bot::{Bot, fallback_action, with_declared_color};
use crate::card::STACKING_VALUES;
use crate::state::GameStateView;

/// Hard difficulty: attack first.
///
/// Policy:
/// - Play the first legal card whose active value is a stacking attack (`wild+4`, `+10`, `+8`,
///   `+2`).
/// - Otherwise play the first legal card.
/// - Otherwise draw.
pub struct AggressiveBot<R: Rng> {
    rng: R,
}

impl<R: Rng> AggressiveBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for AggressiveBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        let mut plays = legal_actions
            .iter()
            .copied()
            .filter(|a| matches!(a, Action::Play { .. }));
        let attack = plays.clone().find(|a| {
            a.hand_index()
                .and_then(|index| state.face(index))
                .is_some_and(|face| STACKING_VALUES.contains(&face.value))
        });
        match attack.or_else(|| plays.next()) {
            Some(action) => with_declared_color(state, action, &mut self.rng),
            None => fallback_action(legal_actions, &mut self.rng),
        }
    }
}
