use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, DARK_COLORS, Face, LIGHT_COLORS, Value};
use crate::error::GameError;

/// Rule variant, fixed for the lifetime of a round.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Classic,
    Flip,
    Mercy,
    Fkk,
}

pub const ALL_MODES: [Mode; 4] = [Mode::Classic, Mode::Flip, Mode::Mercy, Mode::Fkk];

const NUMERALS_PER_COLOR: usize = 10;
const WILD_SETS: usize = 4;

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Flip => "flip",
            Mode::Mercy => "mercy",
            Mode::Fkk => "fkk",
        }
    }

    /// Cards dealt to each seat when a round starts.
    pub fn opening_hand_size(self) -> usize {
        match self {
            Mode::Classic | Mode::Flip => 7,
            Mode::Mercy | Mode::Fkk => 10,
        }
    }

    /// Action cards printed once per light color.
    fn action_values(self) -> &'static [Value] {
        match self {
            Mode::Classic | Mode::Fkk => &[Value::Skip, Value::Reverse, Value::DrawTwo],
            Mode::Flip => &[Value::Skip, Value::DrawTwo, Value::Flip],
            Mode::Mercy => &[
                Value::Skip,
                Value::Reverse,
                Value::DrawTwo,
                Value::DrawTen,
                Value::DrawEight,
            ],
        }
    }

    /// Wild cards added once per wild set.
    fn wild_values(self) -> &'static [Value] {
        match self {
            Mode::Flip => &[Value::Wild],
            Mode::Classic | Mode::Mercy | Mode::Fkk => &[Value::Wild, Value::WildFour],
        }
    }

    /// Total number of cards in play for a round of this mode.
    pub fn deck_size(self) -> usize {
        LIGHT_COLORS.len() * (NUMERALS_PER_COLOR + self.action_values().len())
            + WILD_SETS * self.wild_values().len()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "flip" => Ok(Mode::Flip),
            "mercy" => Ok(Mode::Mercy),
            "fkk" => Ok(Mode::Fkk),
            _ => Err(GameError::UnknownMode(s.to_string())),
        }
    }
}

/// Convenience wrapper over [`Mode::deck_size`].
pub fn deck_size(mode: Mode) -> usize {
    mode.deck_size()
}

/// Builds the mode's composition in printed order. Flip-mode back faces are randomized, so the
/// rng is consumed even though the result is not shuffled.
pub fn full_deck<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> Vec<Card> {
    let mut deck = Vec::with_capacity(mode.deck_size());
    for color in LIGHT_COLORS {
        for n in 0..NUMERALS_PER_COLOR as u8 {
            deck.push(make_card(mode, Face::new(color, Value::Number(n)), rng));
        }
        for &value in mode.action_values() {
            deck.push(make_card(mode, Face::new(color, value), rng));
        }
    }
    for _ in 0..WILD_SETS {
        for &value in mode.wild_values() {
            deck.push(make_card(mode, Face::new(Color::Wild, value), rng));
        }
    }
    deck
}

fn make_card<R: Rng + ?Sized>(mode: Mode, face: Face, rng: &mut R) -> Card {
    if mode == Mode::Flip {
        flip_dual(face, rng)
    } else {
        Card::Single(face)
    }
}

/// Builds and shuffles a deck for `mode`.
pub fn build_deck<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck(mode, rng);
    deck.shuffle(rng);
    deck
}

/// Pairs a front face with a randomized dark back. The back keeps the front's value, except for
/// the flip card itself whose back becomes a numeral between 1 and 7.
pub fn flip_dual<R: Rng + ?Sized>(front: Face, rng: &mut R) -> Card {
    let back_color = DARK_COLORS[rng.gen_range(0..DARK_COLORS.len())];
    let back_value = match front.value {
        Value::Flip => Value::Number(rng.gen_range(1..=7)),
        other => other,
    };
    Card::dual(front, Face::new(back_color, back_value))
}
