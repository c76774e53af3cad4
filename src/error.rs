use thiserror::Error;

use crate::action::Seat;

/// Errors that can occur when configuring or inspecting a round.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown rule mode `{0}`")]
    UnknownMode(String),
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("card conservation violated: expected {expected} cards, counted {counted}")]
    CardConservation { expected: usize, counted: usize },
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules: {0}")]
    Rules(#[from] toml::de::Error),
}

/// Reasons an engine operation was rejected. A rejected operation never changes state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("round is already over")]
    RoundOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Seat),
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("card cannot be played on the current top card")]
    Unplayable,
    #[error("{0} must call UNO before playing the last card")]
    MustCallUno(Seat),
    #[error("UNO can only be called with one or two cards in hand")]
    UnoNotAllowed,
    #[error("a wild color must be chosen first")]
    AwaitingColor,
    #[error("no wild color is being chosen")]
    NoColorPending,
    #[error("`{0}` is not a color that can be declared")]
    UndeclarableColor(crate::card::Color),
}

/// Errors raised by the session relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("room code must be 4 alphanumeric characters, got `{0}`")]
    InvalidRoomCode(String),
    #[error("room is full (max {max} players)")]
    RoomFull { max: usize },
    #[error("peer `{0}` is not connected")]
    UnknownPeer(String),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}
