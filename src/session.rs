//! A local match: the current round, the scoreboard and the relay role. Every action enters
//! through [`Session::apply`] tagged with its [`Origin`]; only local actions are sent to peers.

use crate::action::Seat;
use crate::card::Color;
use crate::config::RulesConfig;
use crate::deck::Mode;
use crate::error::{GameError, InvalidAction, RelayError};
use crate::game::{Game, Opponent, PlayOutcome};
use crate::relay::{Envelope, Message, PeerId, Relay, RoomCode};
use crate::score::Scoreboard;

const ROUND_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Where an action came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Local,
    Remote(PeerId),
}

impl Origin {
    pub fn is_local(&self) -> bool {
        matches!(self, Origin::Local)
    }
}

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub mode: Mode,
    pub opponent: Opponent,
    pub seed: u64,
    pub rules: RulesConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Classic,
            opponent: Opponent::default(),
            seed: 0,
            rules: RulesConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Two-human configuration for a networked room; every peer derives the same seed.
    pub fn for_room(code: &RoomCode) -> Self {
        Self {
            opponent: Opponent::Local,
            seed: code.seed(),
            ..Self::default()
        }
    }
}

pub struct Session {
    config: SessionConfig,
    game: Game,
    scoreboard: Scoreboard,
    relay: Relay,
    outbox: Vec<Envelope>,
    rounds_started: u64,
    /// Hand index of a local wild play still waiting for its color before it is sent.
    unsent_wild: Option<usize>,
}

impl Session {
    /// Opens the session with a first round in `config.mode`. Nothing is sent for it.
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        let game = Self::deal(&config, config.mode, 0)?;
        Ok(Self {
            config,
            game,
            scoreboard: Scoreboard::default(),
            relay: Relay::Offline,
            outbox: Vec::new(),
            rounds_started: 1,
            unsent_wild: None,
        })
    }

    pub fn with_relay(mut self, relay: Relay) -> Self {
        self.relay = relay;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    pub fn relay_mut(&mut self) -> &mut Relay {
        &mut self.relay
    }

    /// Messages waiting to be delivered, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    /// Applies a wire message. Relay notices are logged and never touch the game.
    pub fn apply(&mut self, message: Message, origin: Origin) -> Result<(), GameError> {
        match message {
            Message::Start { mode } => self.start_round(mode, origin),
            Message::Play { index, color } => {
                self.play_card(index, color, origin)?;
                Ok(())
            }
            Message::Draw {} => {
                self.draw(origin)?;
                Ok(())
            }
            Message::CallUno { seat } => {
                self.call_uno(seat, origin)?;
                Ok(())
            }
            Message::System(text) => {
                tracing::info!(%text, "relay notice");
                Ok(())
            }
        }
    }

    /// Handles raw JSON from `from`: applies it as a remote action, then, when hosting, forwards
    /// it to every other guest. A host ignores peers that never joined. A rejected action is
    /// still forwarded so every peer sees the same message sequence.
    pub fn receive(&mut self, raw: &str, from: PeerId) -> Result<(), RelayError> {
        let message = Message::from_json(raw)?;
        if let Message::System(text) = &message {
            tracing::info!(peer = %from, %text, "relay notice");
            return Ok(());
        }
        let forwarded = self.relay.forward(&from, &message)?;
        if let Err(err) = self.apply(message, Origin::Remote(from.clone())) {
            tracing::debug!(peer = %from, %err, "remote action rejected");
        }
        self.outbox.extend(forwarded);
        Ok(())
    }

    /// Discards the current round and deals a new one.
    pub fn start_round(&mut self, mode: Mode, origin: Origin) -> Result<(), GameError> {
        self.game = Self::deal(&self.config, mode, self.rounds_started)?;
        self.rounds_started += 1;
        self.scoreboard.next_round();
        self.unsent_wild = None;
        tracing::info!(%mode, round = self.scoreboard.round, ?origin, "new round");
        self.emit(&origin, Message::Start { mode });
        Ok(())
    }

    /// Plays for the seat on turn. A wild card played without a color waits for
    /// [`Session::choose_color`] and is only sent once the color is known.
    pub fn play(&mut self, index: usize, origin: Origin) -> Result<PlayOutcome, InvalidAction> {
        self.play_card(index, None, origin)
    }

    pub fn play_with_color(
        &mut self,
        index: usize,
        color: Color,
        origin: Origin,
    ) -> Result<PlayOutcome, InvalidAction> {
        self.play_card(index, Some(color), origin)
    }

    /// Completes a local wild play. Not part of the wire protocol on its own.
    pub fn choose_color(&mut self, color: Color) -> Result<PlayOutcome, InvalidAction> {
        let seat = self.human_seat_on_turn()?;
        let was_over = self.game.is_finished();
        let outcome = self.game.choose_color(seat, color)?;
        if let Some(index) = self.unsent_wild.take() {
            self.emit(
                &Origin::Local,
                Message::Play {
                    index,
                    color: Some(color),
                },
            );
        }
        self.after_human_action(was_over);
        Ok(outcome)
    }

    pub fn draw(&mut self, origin: Origin) -> Result<usize, InvalidAction> {
        let seat = self.human_seat_on_turn()?;
        let was_over = self.game.is_finished();
        let drawn = self.game.draw(seat)?;
        self.emit(&origin, Message::Draw {});
        self.after_human_action(was_over);
        Ok(drawn)
    }

    /// Declares UNO for `seat`. Calls can come on either turn, so the seat travels with the
    /// message.
    pub fn call_uno(&mut self, seat: Seat, origin: Origin) -> Result<(), InvalidAction> {
        self.game.call_uno(seat)?;
        self.emit(&origin, Message::CallUno { seat });
        Ok(())
    }

    /// One timer unit. An expired timer draws for the seat on turn, which is sent like any other
    /// local draw; the bot then gets its turn.
    pub fn tick(&mut self) -> Option<usize> {
        let was_over = self.game.is_finished();
        let drawn = self.game.tick();
        if drawn.is_some() {
            self.emit(&Origin::Local, Message::Draw {});
        }
        self.after_human_action(was_over);
        drawn
    }

    fn play_card(
        &mut self,
        index: usize,
        color: Option<Color>,
        origin: Origin,
    ) -> Result<PlayOutcome, InvalidAction> {
        let seat = self.human_seat_on_turn()?;
        let was_over = self.game.is_finished();
        let outcome = match color {
            Some(color) => self.game.play_with_color(seat, index, color)?,
            None => self.game.play(seat, index)?,
        };
        if outcome.awaiting_color {
            if origin.is_local() {
                self.unsent_wild = Some(index);
            }
            return Ok(outcome);
        }
        let color = color.filter(|_| outcome.face.is_wild());
        self.emit(&origin, Message::Play { index, color });
        self.after_human_action(was_over);
        Ok(outcome)
    }

    /// Seat whose turn it is, unless the built-in bot plays it.
    fn human_seat_on_turn(&self) -> Result<Seat, InvalidAction> {
        let seat = self.game.turn();
        if self.game.is_bot_seat(seat) {
            return Err(InvalidAction::NotYourTurn(seat));
        }
        Ok(seat)
    }

    fn after_human_action(&mut self, was_over: bool) {
        if matches!(self.game.opponent(), Opponent::Bot(_)) {
            self.game.bot_turn();
        }
        if !was_over && self.game.is_finished() {
            if let Some(winner) = self.scoreboard.record(self.game.status()) {
                tracing::info!(
                    %winner,
                    p1 = self.scoreboard.wins(Seat::P1),
                    p2 = self.scoreboard.wins(Seat::P2),
                    "score updated"
                );
            }
        }
    }

    fn emit(&mut self, origin: &Origin, message: Message) {
        if origin.is_local() {
            self.outbox.extend(self.relay.outgoing(&message));
        }
    }

    fn deal(config: &SessionConfig, mode: Mode, round: u64) -> Result<Game, GameError> {
        Game::builder(mode)
            .with_seed(config.seed ^ round.wrapping_mul(ROUND_SEED_STEP))
            .with_opponent(config.opponent)
            .with_rules(config.rules.clone())
            .build()
    }
}
