use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Seat};
use crate::bot::{Bot, Difficulty};
use crate::bots::create_bot;
use crate::card::{Card, Color, Face, LIGHT_COLORS, Side, Value};
use crate::config::RulesConfig;
use crate::deck::{Mode, build_deck};
use crate::effect::{self, ColorChoice, random_color};
use crate::error::{GameError, InvalidAction};
use crate::state::{GameState, GameStateView, Pending, RoundStatus, TurnPhase, WinCause};
use crate::timer::TurnTimer;

const DEFAULT_SEED: u64 = 0x5EED_CA4D_5EED_CA4D;
const BOT_SEED_SALT: u64 = 0xB07B_07B0;

/// Who sits in P2. P1 is always the local human.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Bot(Difficulty),
    /// A second human on the same device or on a remote peer.
    Local,
}

impl Default for Opponent {
    fn default() -> Self {
        Opponent::Bot(Difficulty::default())
    }
}

/// Configuration required to bootstrap a round.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub mode: Mode,
    pub seed: u64,
    pub opponent: Opponent,
    pub hand_size: Option<usize>,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            mode,
            seed,
            opponent: Opponent::default(),
            hand_size: None,
            rules: RulesConfig::default(),
        }
    }
}

/// Builder that enables deterministic deck injection for tests and simulations.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new(mode: Mode) -> Self {
        Self {
            config: GameConfig::new(mode, DEFAULT_SEED),
            deck: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as-is instead of building and shuffling one. Cards are dealt from the end,
    /// alternating P1 then P2, and the next card becomes the top card.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the opening hand size. When not set the mode's default applies: 7 cards for
    /// classic and flip, 10 for mercy and fkk.
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = Some(hand_size);
        self
    }

    pub fn with_opponent(mut self, opponent: Opponent) -> Self {
        self.config.opponent = opponent;
        self
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.config.rules = rules;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Entry in the round history.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted { mode: Mode, top: Card },
    Played { seat: Seat, face: Face },
    SideFlipped { side: Side },
    ColorChosen { seat: Seat, color: Color },
    Drew { seat: Seat, count: usize },
    ForcedDraw { seat: Seat, count: usize },
    UnoCalled { seat: Seat },
    UnoPenalty { seat: Seat, count: usize },
    HandLimitPenalty { seat: Seat, count: usize },
    TimerExpired { seat: Seat },
    RoundWon { winner: Seat, cause: WinCause },
}

/// Result of an accepted play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Active face of the played card after any flip.
    pub face: Face,
    pub skip_opponent: bool,
    /// The wild color must still be supplied through [`Game::choose_color`].
    pub awaiting_color: bool,
    pub round_over: bool,
}

/// Result of an accepted [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Played(PlayOutcome),
    Drew(usize),
    UnoCalled,
}

#[derive(Clone, Copy, Debug)]
struct ColorPrompt {
    seat: Seat,
    skip_opponent: bool,
}

/// Turn engine: owns the round state and is the only thing that mutates it.
pub struct Game {
    state: GameState,
    rules: RulesConfig,
    opponent: Opponent,
    bot: Option<Box<dyn Bot>>,
    timer: TurnTimer,
    prompt: Option<ColorPrompt>,
    history: VecDeque<GameEvent>,
    rng: StdRng,
}

impl Game {
    pub fn builder(mode: Mode) -> GameBuilder {
        GameBuilder::new(mode)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    pub fn turn(&self) -> Seat {
        self.state.turn
    }

    pub fn top(&self) -> Card {
        self.state.top
    }

    pub fn top_face(&self) -> Face {
        self.state.top_face()
    }

    pub fn side(&self) -> Side {
        self.state.side
    }

    pub fn chosen_color(&self) -> Option<Color> {
        self.state.chosen_color
    }

    pub fn pending(&self) -> Option<Pending> {
        self.state.pending
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        self.state.hand(seat)
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_ended()
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.state.status {
            RoundStatus::Won { winner, .. } => Some(winner),
            RoundStatus::Ongoing => None,
        }
    }

    pub fn timer_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    /// Most recent events first.
    pub fn history(&self) -> impl Iterator<Item = &GameEvent> {
        self.history.iter()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.state.is_ended() {
            TurnPhase::RoundEnded
        } else if let Some(prompt) = self.prompt {
            TurnPhase::ChoosingColor(prompt.seat)
        } else {
            TurnPhase::AwaitingPlay(self.state.turn)
        }
    }

    /// Whether `seat` is played by the built-in bot.
    pub fn is_bot_seat(&self, seat: Seat) -> bool {
        seat == Seat::P2 && matches!(self.opponent, Opponent::Bot(_))
    }

    /// Whether [`Game::play`] would accept the card at `index` of `seat`'s hand.
    pub fn can_play(&self, seat: Seat, index: usize) -> bool {
        self.validate_play(seat, index).is_ok()
    }

    /// Hand indices `seat` could play right now; exactly the indices [`Game::play`] accepts.
    pub fn legal_plays(&self, seat: Seat) -> Vec<usize> {
        (0..self.state.hand(seat).len())
            .filter(|&index| self.can_play(seat, index))
            .collect()
    }

    pub fn legal_actions(&self, seat: Seat) -> Vec<Action> {
        if self.state.is_ended() {
            return Vec::new();
        }
        if let Some(prompt) = self.prompt {
            if prompt.seat != seat {
                return Vec::new();
            }
            return LIGHT_COLORS.iter().copied().map(Action::ChooseColor).collect();
        }
        let mut actions = Vec::new();
        if self.may_call_uno(seat) && !self.state.uno_called(seat) {
            actions.push(Action::CallUno);
        }
        if seat != self.state.turn {
            return actions;
        }
        actions.extend(self.legal_plays(seat).into_iter().map(Action::play));
        actions.push(Action::Draw);
        actions
    }

    pub fn state_view(&self, perspective: Seat) -> GameStateView {
        GameStateView {
            mode: self.state.mode,
            phase: self.phase(),
            status: self.state.status,
            self_seat: perspective,
            turn: self.state.turn,
            side: self.state.side,
            top: self.state.top,
            current_color: self.state.current_color(),
            chosen_color: self.state.chosen_color,
            pending: self.state.pending,
            draw_pile_count: self.state.deck.len(),
            discard_count: self.state.discard.len(),
            hand: self.state.hand(perspective).to_vec(),
            opponent_hand_size: self.state.hand(perspective.other()).len(),
            uno_called: self.state.uno_called(perspective),
            timer_remaining: self.timer.remaining(),
        }
    }

    /// Verifies that no card was created or destroyed since the round started.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let counted = self.state.card_count();
        let expected = self.state.total_cards;
        if counted != expected {
            return Err(GameError::CardConservation { expected, counted });
        }
        Ok(())
    }

    pub fn apply_action(&mut self, seat: Seat, action: Action) -> Result<ActionOutcome, InvalidAction> {
        match action {
            Action::Play {
                index,
                color: Some(color),
            } => self.play_with_color(seat, index, color).map(ActionOutcome::Played),
            Action::Play { index, color: None } => self.play(seat, index).map(ActionOutcome::Played),
            Action::Draw => self.draw(seat).map(ActionOutcome::Drew),
            Action::CallUno => self.call_uno(seat).map(|()| ActionOutcome::UnoCalled),
            Action::ChooseColor(color) => self.choose_color(seat, color).map(ActionOutcome::Played),
        }
    }

    /// Plays the card at `index`. A wild face played by a bot seat gets a random color; a human
    /// seat is left in [`TurnPhase::ChoosingColor`].
    pub fn play(&mut self, seat: Seat, index: usize) -> Result<PlayOutcome, InvalidAction> {
        let choice = if self.is_bot_seat(seat) {
            ColorChoice::Random
        } else {
            ColorChoice::Prompt
        };
        self.play_card(seat, index, choice)
    }

    /// Plays the card at `index`, declaring `color` if its face is wild.
    pub fn play_with_color(
        &mut self,
        seat: Seat,
        index: usize,
        color: Color,
    ) -> Result<PlayOutcome, InvalidAction> {
        if !LIGHT_COLORS.contains(&color) {
            return Err(InvalidAction::UndeclarableColor(color));
        }
        self.play_card(seat, index, ColorChoice::Declared(color))
    }

    /// Completes a wild play that was waiting for its color.
    pub fn choose_color(&mut self, seat: Seat, color: Color) -> Result<PlayOutcome, InvalidAction> {
        let prompt = self.prompt.ok_or(InvalidAction::NoColorPending)?;
        if prompt.seat != seat {
            return Err(InvalidAction::NotYourTurn(seat));
        }
        if !LIGHT_COLORS.contains(&color) {
            return Err(InvalidAction::UndeclarableColor(color));
        }
        self.prompt = None;
        self.state.chosen_color = Some(color);
        self.record(GameEvent::ColorChosen { seat, color });
        self.finish_play(seat, prompt.skip_opponent);
        Ok(PlayOutcome {
            face: self.state.top_face(),
            skip_opponent: prompt.skip_opponent,
            awaiting_color: false,
            round_over: self.state.is_ended(),
        })
    }

    /// Draws for `seat`: the whole pending stack if there is one, otherwise a single card. The
    /// turn always passes afterwards.
    pub fn draw(&mut self, seat: Seat) -> Result<usize, InvalidAction> {
        self.ensure_turn(seat)?;
        let requested = self.state.pending.map_or(1, |pending| pending.amount);
        let drawn = self.state.draw_into(seat, requested, &mut self.rng);
        self.state.pending = None;
        tracing::debug!(%seat, drawn, "drew cards");
        self.record(GameEvent::Drew { seat, count: drawn });
        if self.apply_hand_limits() {
            return Ok(drawn);
        }
        self.pass_turn_to(seat.other());
        Ok(drawn)
    }

    /// Declares UNO for `seat`. Accepted with one or two cards in hand.
    pub fn call_uno(&mut self, seat: Seat) -> Result<(), InvalidAction> {
        if self.state.is_ended() {
            return Err(InvalidAction::RoundOver);
        }
        if !self.may_call_uno(seat) {
            return Err(InvalidAction::UnoNotAllowed);
        }
        if self.state.uno_debt == Some(seat) {
            self.state.uno_debt = None;
        }
        if !self.state.uno_called[seat.index()] {
            self.state.uno_called[seat.index()] = true;
            tracing::debug!(%seat, "UNO called");
            self.record(GameEvent::UnoCalled { seat });
        }
        Ok(())
    }

    /// Advances the turn timer by one unit. When it runs out the seat on turn draws as if it had
    /// asked to; the number of drawn cards is returned in that case.
    pub fn tick(&mut self) -> Option<usize> {
        if self.state.is_ended() || self.prompt.is_some() {
            return None;
        }
        if !self.timer.tick() {
            return None;
        }
        let seat = self.state.turn;
        tracing::debug!(%seat, "turn timer expired");
        self.record(GameEvent::TimerExpired { seat });
        self.draw(seat).ok()
    }

    /// Lets `bot` take one decision for `seat`. UNO is called automatically when it is due.
    pub fn step_with(&mut self, seat: Seat, bot: &mut dyn Bot) -> Result<ActionOutcome, InvalidAction> {
        if self.prompt.is_none() && self.may_call_uno(seat) && !self.state.uno_called(seat) {
            self.call_uno(seat)?;
        }
        let legal_actions = self.legal_actions(seat);
        if !legal_actions.iter().any(|a| !matches!(a, Action::CallUno)) {
            return Err(if self.state.is_ended() {
                InvalidAction::RoundOver
            } else {
                InvalidAction::NotYourTurn(seat)
            });
        }
        let view = self.state_view(seat);
        let action = bot.select_action(&view, &legal_actions);
        self.apply_action(seat, action)
    }

    /// Runs the built-in opponent while it holds the turn, up to `max_bot_chain` decisions so a
    /// run of skips cannot loop forever. Returns the number of decisions taken.
    pub fn bot_turn(&mut self) -> usize {
        let Some(mut bot) = self.bot.take() else {
            return 0;
        };
        let seat = Seat::P2;
        let mut decisions = 0;
        while decisions < self.rules.max_bot_chain
            && !self.state.is_ended()
            && self.prompt.is_none()
            && self.state.turn == seat
        {
            match self.step_with(seat, bot.as_mut()) {
                Ok(_) => decisions += 1,
                Err(err) => {
                    tracing::warn!(%err, "bot action rejected");
                    break;
                }
            }
        }
        self.bot = Some(bot);
        decisions
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        config.rules.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = match deck {
            Some(deck) => deck,
            None => build_deck(config.mode, &mut rng),
        };
        let hand_size = config.hand_size.unwrap_or(config.mode.opening_hand_size());
        if hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if deck.len() < hand_size * 2 + 1 {
            return Err(GameError::InvalidConfiguration(
                "deck does not contain enough cards to deal",
            ));
        }

        let total_cards = deck.len();
        let mut hands = [Vec::with_capacity(hand_size), Vec::with_capacity(hand_size)];
        for _ in 0..hand_size {
            for seat in Seat::ALL {
                let card = deck.pop().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing",
                ))?;
                hands[seat.index()].push(card);
            }
        }
        let top = deck.pop().ok_or(GameError::InvalidConfiguration(
            "deck exhausted before the top card",
        ))?;

        let mut state = GameState {
            mode: config.mode,
            deck,
            discard: Vec::new(),
            hands,
            top,
            side: Side::Front,
            chosen_color: None,
            pending: None,
            turn: Seat::P1,
            uno_called: [false; 2],
            uno_debt: None,
            status: RoundStatus::Ongoing,
            total_cards,
        };
        if state.top_face().is_wild() {
            state.chosen_color = Some(random_color(&mut rng));
        }

        let bot = match config.opponent {
            Opponent::Bot(difficulty) => Some(create_bot(difficulty, config.seed ^ BOT_SEED_SALT)),
            Opponent::Local => None,
        };

        let mut game = Game {
            state,
            rules: config.rules.clone(),
            opponent: config.opponent,
            bot,
            timer: TurnTimer::new(config.rules.turn_timer_ticks),
            prompt: None,
            history: VecDeque::with_capacity(config.rules.history_len),
            rng,
        };
        tracing::info!(mode = %config.mode, hand_size, top = %top, "round started");
        game.record(GameEvent::RoundStarted {
            mode: config.mode,
            top,
        });
        Ok(game)
    }

    fn ensure_turn(&self, seat: Seat) -> Result<(), InvalidAction> {
        if self.state.is_ended() {
            return Err(InvalidAction::RoundOver);
        }
        if self.prompt.is_some() {
            return Err(InvalidAction::AwaitingColor);
        }
        if seat != self.state.turn {
            return Err(InvalidAction::NotYourTurn(seat));
        }
        Ok(())
    }

    fn validate_play(&self, seat: Seat, index: usize) -> Result<Card, InvalidAction> {
        self.ensure_turn(seat)?;
        let hand = self.state.hand(seat);
        let card = *hand.get(index).ok_or(InvalidAction::HandIndex(index))?;
        if !self.state.can_play(&card) {
            return Err(InvalidAction::Unplayable);
        }
        if hand.len() == 1 && !self.state.uno_called(seat) {
            return Err(InvalidAction::MustCallUno(seat));
        }
        Ok(card)
    }

    fn may_call_uno(&self, seat: Seat) -> bool {
        (1..=2).contains(&self.state.hand(seat).len())
    }

    fn play_card(
        &mut self,
        seat: Seat,
        index: usize,
        choice: ColorChoice,
    ) -> Result<PlayOutcome, InvalidAction> {
        self.validate_play(seat, index)?;
        let card = self.state.hands[seat.index()].remove(index);
        self.state.place_on_top(card);
        if self.state.mode == Mode::Flip && self.state.face_of(&card).value == Value::Flip {
            self.state.side = self.state.side.flipped();
            self.record(GameEvent::SideFlipped {
                side: self.state.side,
            });
        }

        let face = self.state.top_face();
        tracing::debug!(%seat, %face, "card played");
        self.record(GameEvent::Played { seat, face });

        let resolution = effect::resolve(
            &mut self.state,
            face,
            seat,
            choice,
            &self.rules,
            &mut self.rng,
        );
        if resolution.forced_draw > 0 {
            self.record(GameEvent::ForcedDraw {
                seat: seat.other(),
                count: resolution.forced_draw,
            });
        }
        if resolution.awaiting_color {
            self.prompt = Some(ColorPrompt {
                seat,
                skip_opponent: resolution.skip_opponent,
            });
            return Ok(PlayOutcome {
                face,
                skip_opponent: resolution.skip_opponent,
                awaiting_color: true,
                round_over: false,
            });
        }
        if face.is_wild() {
            if let Some(color) = self.state.chosen_color {
                self.record(GameEvent::ColorChosen { seat, color });
            }
        }

        self.finish_play(seat, resolution.skip_opponent);
        Ok(PlayOutcome {
            face,
            skip_opponent: resolution.skip_opponent,
            awaiting_color: false,
            round_over: self.state.is_ended(),
        })
    }

    /// Win check, UNO bookkeeping, hand limits, then the turn handoff. An open stack always goes
    /// to the opponent, who must answer it or draw.
    fn finish_play(&mut self, seat: Seat, skip_opponent: bool) {
        let remaining = self.state.hand(seat).len();
        if remaining == 0 {
            self.end_round(seat, WinCause::EmptiedHand);
            return;
        }
        if remaining == 1 && !self.state.uno_called(seat) {
            self.state.uno_debt = Some(seat);
        }
        if self.apply_hand_limits() {
            return;
        }
        let next = if self.state.pending.is_some() || !skip_opponent {
            seat.other()
        } else {
            seat
        };
        self.pass_turn_to(next);
    }

    /// Hands the turn to `next` and restarts the timer. A seat that still owes UNO with one card
    /// left pays the penalty when the turn comes back to it.
    fn pass_turn_to(&mut self, next: Seat) {
        let handoff = next != self.state.turn;
        self.state.turn = next;
        if handoff && self.state.uno_debt == Some(next) {
            self.state.uno_debt = None;
            if self.state.hand(next).len() == 1 && !self.state.uno_called(next) {
                let count = self
                    .state
                    .draw_into(next, self.rules.uno_penalty, &mut self.rng);
                tracing::debug!(seat = %next, count, "UNO penalty");
                self.record(GameEvent::UnoPenalty { seat: next, count });
                if self.apply_hand_limits() {
                    return;
                }
            }
        }
        self.timer.reset();
    }

    /// Mode-specific hand-size rules, P1 first. Returns true when the round ended.
    fn apply_hand_limits(&mut self) -> bool {
        for seat in Seat::ALL {
            let size = self.state.hand(seat).len();
            match self.state.mode {
                Mode::Mercy if size >= self.rules.mercy_hand_limit => {
                    tracing::info!(%seat, size, "mercy hand limit reached");
                    self.end_round(seat.other(), WinCause::OverLimit);
                    return true;
                }
                Mode::Fkk if size >= self.rules.fkk_hand_limit => {
                    let count = self
                        .state
                        .draw_into(seat, self.rules.fkk_penalty, &mut self.rng);
                    tracing::debug!(%seat, size, count, "fkk hand limit penalty");
                    self.record(GameEvent::HandLimitPenalty { seat, count });
                }
                _ => {}
            }
        }
        false
    }

    fn end_round(&mut self, winner: Seat, cause: WinCause) {
        self.state.status = RoundStatus::Won { winner, cause };
        self.state.pending = None;
        self.prompt = None;
        tracing::info!(%winner, ?cause, "round finished");
        self.record(GameEvent::RoundWon { winner, cause });
    }

    fn record(&mut self, event: GameEvent) {
        self.history.push_front(event);
        self.history.truncate(self.rules.history_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(color: Color, value: Value) -> Card {
        Card::single(color, value)
    }

    /// Deck that deals `p1` and `p2` in order, then `top`, then draws the tail of `draws` first.
    fn stacked(p1: &[Card], p2: &[Card], top: Card, draws: &[Card]) -> Vec<Card> {
        assert_eq!(p1.len(), p2.len());
        let mut deck = draws.to_vec();
        deck.push(top);
        for i in (0..p1.len()).rev() {
            deck.push(p2[i]);
            deck.push(p1[i]);
        }
        deck
    }

    fn filler(n: usize) -> Vec<Card> {
        vec![card(Color::Green, Value::Number(7)); n]
    }

    #[test]
    fn opening_deal_uses_mode_hand_size() -> Result<(), GameError> {
        let game = Game::builder(Mode::Mercy).with_seed(11).build()?;
        assert_eq!(game.hand(Seat::P1).len(), 10);
        assert_eq!(game.hand(Seat::P2).len(), 10);
        assert_eq!(game.turn(), Seat::P1);
        assert_eq!(game.state().deck_len(), Mode::Mercy.deck_size() - 21);
        game.check_conservation()
    }

    #[test]
    fn wild_opening_top_gets_a_color() -> Result<(), GameError> {
        let p = filler(2);
        let deck = stacked(&p, &p, card(Color::Wild, Value::Wild), &filler(3));
        let game = Game::builder(Mode::Classic)
            .with_deck(deck)
            .with_hand_size(2)
            .build()?;
        assert!(game.chosen_color().is_some());
        assert!(game.pending().is_none());
        Ok(())
    }

    #[test]
    fn timer_forces_a_draw() -> Result<(), GameError> {
        let rules = RulesConfig {
            turn_timer_ticks: 3,
            ..RulesConfig::default()
        };
        let mut game = Game::builder(Mode::Classic)
            .with_rules(rules)
            .with_opponent(Opponent::Local)
            .build()?;
        assert_eq!(game.tick(), None);
        assert_eq!(game.tick(), None);
        assert_eq!(game.tick(), Some(1));
        assert_eq!(game.hand(Seat::P1).len(), 8);
        assert_eq!(game.turn(), Seat::P2);
        assert_eq!(game.timer_remaining(), 3);
        assert!(matches!(
            game.history().nth(1),
            Some(GameEvent::TimerExpired { seat: Seat::P1 })
        ));
        Ok(())
    }

    #[test]
    fn history_is_bounded() -> Result<(), GameError> {
        let mut game = Game::builder(Mode::Classic)
            .with_opponent(Opponent::Local)
            .build()?;
        for _ in 0..20 {
            let seat = game.turn();
            game.draw(seat)?;
        }
        assert_eq!(game.history().count(), 15);
        Ok(())
    }

    #[test]
    fn rejected_play_leaves_state_untouched() -> Result<(), GameError> {
        let p1 = vec![card(Color::Blue, Value::Number(3)), card(Color::Red, Value::Number(1))];
        let p2 = filler(2);
        let deck = stacked(&p1, &p2, card(Color::Red, Value::Number(5)), &filler(4));
        let mut game = Game::builder(Mode::Classic)
            .with_deck(deck)
            .with_hand_size(2)
            .with_opponent(Opponent::Local)
            .build()?;
        let before = game.state().clone();
        assert_eq!(game.play(Seat::P1, 0), Err(InvalidAction::Unplayable));
        assert_eq!(game.play(Seat::P1, 9), Err(InvalidAction::HandIndex(9)));
        assert_eq!(game.play(Seat::P2, 0), Err(InvalidAction::NotYourTurn(Seat::P2)));
        assert_eq!(game.state(), &before);
        Ok(())
    }
}
