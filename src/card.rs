use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Card color. The first four are the light palette used on front faces; the dark palette only
/// ever appears on the back face of flip-mode cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Teal,
    Orange,
    Purple,
    /// Sentinel for cards whose color is declared when played.
    Wild,
}

pub const LIGHT_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];
pub const DARK_COLORS: [Color; 4] = [Color::Pink, Color::Teal, Color::Orange, Color::Purple];

impl Color {
    #[inline]
    pub fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Wild => "wild",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "pink" => Ok(Color::Pink),
            "teal" => Ok(Color::Teal),
            "orange" => Ok(Color::Orange),
            "purple" => Ok(Color::Purple),
            "wild" => Ok(Color::Wild),
            _ => Err(ParseCardError::Color(s.to_string())),
        }
    }
}

/// Failure to parse a card token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("unknown color `{0}`")]
    Color(String),
    #[error("unknown card value `{0}`")]
    Value(String),
}

/// Printed value of a card face.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Value {
    /// Numeral between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    WildFour,
    DrawEight,
    DrawTen,
    Flip,
    Wild,
}

/// Values that open or answer a draw stack.
pub const STACKING_VALUES: [Value; 4] =
    [Value::WildFour, Value::DrawTen, Value::DrawEight, Value::DrawTwo];

impl Value {
    /// Number of cards this value forces the opponent to draw, if it is a stacking card.
    #[inline]
    pub fn draw_amount(self) -> Option<usize> {
        match self {
            Value::DrawTwo => Some(2),
            Value::WildFour => Some(4),
            Value::DrawEight => Some(8),
            Value::DrawTen => Some(10),
            _ => None,
        }
    }

    #[inline]
    pub fn is_stacking(self) -> bool {
        self.draw_amount().is_some()
    }

    #[inline]
    pub fn number(self) -> Option<u8> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        const NUMERALS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Value::Number(n) => NUMERALS.get(n as usize).copied().unwrap_or("?"),
            Value::Skip => "skip",
            Value::Reverse => "reverse",
            Value::DrawTwo => "+2",
            Value::WildFour => "wild+4",
            Value::DrawEight => "+8",
            Value::DrawTen => "+10",
            Value::Flip => "flip",
            Value::Wild => "wild",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Value {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let value = match token.as_str() {
            "skip" => Value::Skip,
            "reverse" => Value::Reverse,
            "+2" => Value::DrawTwo,
            "wild+4" | "+4" => Value::WildFour,
            "+8" => Value::DrawEight,
            "+10" => Value::DrawTen,
            "flip" => Value::Flip,
            "wild" => Value::Wild,
            other => match other.parse::<u8>() {
                Ok(n) if n <= 9 => Value::Number(n),
                _ => return Err(ParseCardError::Value(s.to_string())),
            },
        };
        Ok(value)
    }
}

impl TryFrom<String> for Value {
    type Error = ParseCardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.token().to_string()
    }
}

/// One printed side of a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub color: Color,
    pub value: Value,
}

impl Face {
    pub const fn new(color: Color, value: Value) -> Self {
        Self { color, value }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color.is_wild()
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}

/// Which face of a dual card is up for the whole table.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

/// A physical card: single-faced in every mode except flip, where each card is dual.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Card {
    Dual { front: Face, back: Face },
    Single(Face),
}

impl Card {
    pub const fn single(color: Color, value: Value) -> Self {
        Card::Single(Face::new(color, value))
    }

    pub const fn dual(front: Face, back: Face) -> Self {
        Card::Dual { front, back }
    }

    /// Face that is currently in play. Single cards ignore `side`.
    #[inline]
    pub fn face(&self, side: Side) -> Face {
        match (self, side) {
            (Card::Single(face), _) => *face,
            (Card::Dual { front, .. }, Side::Front) => *front,
            (Card::Dual { back, .. }, Side::Back) => *back,
        }
    }

    #[inline]
    pub fn is_dual(&self) -> bool {
        matches!(self, Card::Dual { .. })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Single(face) => write!(f, "{face}"),
            Card::Dual { front, back } => write!(f, "{front} / {back}"),
        }
    }
}
