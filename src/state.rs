use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::card::{Card, Color, Face, Side, Value};
use crate::deck::Mode;

/// Outstanding draw obligation created by a stacking card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pending {
    pub amount: usize,
    pub kind: Value,
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WinCause {
    /// The winner played their last card.
    EmptiedHand,
    /// The loser's hand crossed the mode's hand-size limit.
    OverLimit,
}

/// Status of the round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Ongoing,
    Won { winner: Seat, cause: WinCause },
}

/// Observable phase of the turn state machine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingPlay(Seat),
    /// A wild card was played by a human seat and its color has not been declared yet.
    ChoosingColor(Seat),
    RoundEnded,
}

/// Entire state of one round. Mutated only through [`crate::Game`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub(crate) mode: Mode,
    /// Undrawn cards; draws pop from the end.
    pub(crate) deck: Vec<Card>,
    /// Played cards underneath `top`.
    pub(crate) discard: Vec<Card>,
    pub(crate) hands: [Vec<Card>; 2],
    pub(crate) top: Card,
    pub(crate) side: Side,
    pub(crate) chosen_color: Option<Color>,
    pub(crate) pending: Option<Pending>,
    pub(crate) turn: Seat,
    pub(crate) uno_called: [bool; 2],
    /// Seat that reached one card without calling UNO.
    pub(crate) uno_debt: Option<Seat>,
    pub(crate) status: RoundStatus,
    pub(crate) total_cards: usize,
}

impl GameState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn top(&self) -> Card {
        self.top
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn chosen_color(&self) -> Option<Color> {
        self.chosen_color
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat.index()]
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn uno_called(&self, seat: Seat) -> bool {
        self.uno_called[seat.index()]
    }

    pub fn uno_debt(&self) -> Option<Seat> {
        self.uno_debt
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.status, RoundStatus::Won { .. })
    }

    /// Number of cards the round was created with.
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards currently accounted for across every zone, the top card included.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands[0].len() + self.hands[1].len() + 1
    }

    /// Face of `card` under the table's current side.
    #[inline]
    pub fn face_of(&self, card: &Card) -> Face {
        card.face(self.side)
    }

    #[inline]
    pub fn top_face(&self) -> Face {
        self.face_of(&self.top)
    }

    /// Color that must be matched: the declared wild color, otherwise the top face's color.
    pub fn current_color(&self) -> Color {
        self.chosen_color.unwrap_or_else(|| self.top_face().color)
    }

    /// Whether `card` may be played on the current top card. During an active stack only a card
    /// of the same stacking kind is legal.
    pub fn can_play(&self, card: &Card) -> bool {
        let face = self.face_of(card);
        if let Some(pending) = self.pending {
            return face.value.is_stacking() && face.value == pending.kind;
        }
        face.is_wild() || face.color == self.current_color() || face.value == self.top_face().value
    }

    /// Places `card` on top, sinking the previous top into the discard pile.
    pub(crate) fn place_on_top(&mut self, card: Card) {
        let previous = std::mem::replace(&mut self.top, card);
        self.discard.push(previous);
    }

    /// Moves up to `count` cards into `seat`'s hand, recycling the discard pile when the deck
    /// runs dry. Returns how many cards were actually drawn.
    pub(crate) fn draw_into<R: Rng + ?Sized>(&mut self, seat: Seat, count: usize, rng: &mut R) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            match self.draw_card(rng) {
                Some(card) => {
                    self.hands[seat.index()].push(card);
                    drawn += 1;
                }
                None => {
                    tracing::warn!(%seat, requested = count, drawn, "draw pile and discard both exhausted");
                    break;
                }
            }
        }
        if drawn > 0 {
            self.uno_called[seat.index()] = false;
            if self.uno_debt == Some(seat) {
                self.uno_debt = None;
            }
        }
        drawn
    }

    fn draw_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if let Some(card) = self.deck.pop() {
            return Some(card);
        }
        if self.discard.is_empty() {
            return None;
        }
        self.recycle_discard(rng);
        self.deck.pop()
    }

    /// Shuffles everything under the top card back into the deck.
    fn recycle_discard<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.discard.shuffle(rng);
        self.deck.append(&mut self.discard);
        tracing::debug!(deck = self.deck.len(), "discard pile recycled into deck");
    }
}

/// Snapshot of a round from one seat's perspective, used by bots and renderers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub mode: Mode,
    pub phase: TurnPhase,
    pub status: RoundStatus,
    pub self_seat: Seat,
    pub turn: Seat,
    pub side: Side,
    pub top: Card,
    pub current_color: Color,
    pub chosen_color: Option<Color>,
    pub pending: Option<Pending>,
    pub draw_pile_count: usize,
    pub discard_count: usize,
    pub hand: Vec<Card>,
    pub opponent_hand_size: usize,
    pub uno_called: bool,
    pub timer_remaining: u32,
}

impl GameStateView {
    pub fn top_face(&self) -> Face {
        self.top.face(self.side)
    }

    /// Active face of the card at `index` in the viewer's hand.
    pub fn face(&self, index: usize) -> Option<Face> {
        self.hand.get(index).map(|card| card.face(self.side))
    }
}
