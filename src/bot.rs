use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::effect::random_color;
use crate::error::GameError;
use crate::state::GameStateView;

/// Interface for automated (or prompted) seats.
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}

/// Skill tier of the built-in opponent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Plays the first legal card.
    Easy,
    /// Plays a uniformly random legal card.
    #[default]
    Normal,
    /// Prefers attack cards.
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Declares a random light color when `action` plays a wild face.
pub fn with_declared_color<R: Rng + ?Sized>(
    state: &GameStateView,
    action: Action,
    rng: &mut R,
) -> Action {
    match action {
        Action::Play { index, color: None }
            if state.face(index).is_some_and(|face| face.is_wild()) =>
        {
            Action::Play {
                index,
                color: Some(random_color(rng)),
            }
        }
        other => other,
    }
}

/// What an automated seat does when it has no card to play: answer a color prompt if one is
/// open, otherwise draw.
pub fn fallback_action<R: Rng + ?Sized>(legal_actions: &[Action], rng: &mut R) -> Action {
    if legal_actions
        .iter()
        .any(|a| matches!(a, Action::ChooseColor(_)))
    {
        return Action::ChooseColor(random_color(rng));
    }
    legal_actions
        .iter()
        .copied()
        .find(|a| matches!(a, Action::Draw))
        .unwrap_or(Action::Draw)
}
