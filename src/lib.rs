//! Two-seat UNO rules engine with classic, flip, mercy and fkk variants, built-in bots and the
//! message layer used to mirror a round between peers.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod config;
pub mod deck;
pub mod effect;
pub mod error;
pub mod game;
pub mod relay;
pub mod score;
pub mod session;
pub mod state;
pub mod timer;
pub mod visualize;

pub use crate::action::{Action, Seat};
pub use crate::bot::{Bot, Difficulty};
pub use crate::bots::{
    AggressiveBot, FirstLegalBot, HumanBot, RandomBot, create_bot, create_bot_from_spec,
};
pub use crate::card::{Card, Color, Face, Side, Value};
pub use crate::config::{RulesConfig, load_rules};
pub use crate::deck::{Mode, build_deck, deck_size};
pub use crate::error::{GameError, InvalidAction, RelayError};
pub use crate::game::{
    ActionOutcome, Game, GameBuilder, GameConfig, GameEvent, Opponent, PlayOutcome,
};
pub use crate::relay::{Envelope, Hub, Message, PeerId, Relay, RoomCode};
pub use crate::score::Scoreboard;
pub use crate::session::{Origin, Session, SessionConfig};
pub use crate::state::{GameState, GameStateView, Pending, RoundStatus, TurnPhase, WinCause};
pub use crate::visualize::{VisualOptions, describe_action, render_state};
