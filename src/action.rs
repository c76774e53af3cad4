use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::Color;

/// One of the two seats at the table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::P1, Seat::P2];

    #[inline]
    pub fn other(self) -> Self {
        match self {
            Seat::P1 => Seat::P2,
            Seat::P2 => Seat::P1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::P1 => 0,
            Seat::P2 => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::P1 => f.write_str("P1"),
            Seat::P2 => f.write_str("P2"),
        }
    }
}

/// Action available to a seat during its turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at `index`. `color` declares the wild color up front; when it is missing on a
    /// wild face a human seat is asked for it afterwards.
    Play { index: usize, color: Option<Color> },
    /// Draw one card, or the whole pending stack.
    Draw,
    /// Declare UNO.
    CallUno,
    /// Declare the color of a wild card that is waiting for one.
    ChooseColor(Color),
}

impl Action {
    pub fn play(index: usize) -> Self {
        Action::Play { index, color: None }
    }

    /// Returns the hand index if the action is a play.
    pub fn hand_index(&self) -> Option<usize> {
        match self {
            Action::Play { index, .. } => Some(*index),
            _ => None,
        }
    }
}
