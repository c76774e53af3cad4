//! Consequences of a played card: skips, draw stacks and wild colors.

use rand::Rng;

use crate::action::Seat;
use crate::card::{Color, Face, LIGHT_COLORS, Value};
use crate::config::RulesConfig;
use crate::deck::Mode;
use crate::state::{GameState, Pending};

/// How the color of a wild face gets decided.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorChoice {
    /// Already declared by the player.
    Declared(Color),
    /// Drawn uniformly from the light palette (automated seats).
    Random,
    /// Left open; the caller must ask the player.
    Prompt,
}

/// What the turn engine needs to know after a card resolved.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Resolution {
    /// The acting seat's opponent loses its turn.
    pub skip_opponent: bool,
    /// Cards moved into the opponent's hand immediately (mercy reverse).
    pub forced_draw: usize,
    /// The wild color still has to be declared.
    pub awaiting_color: bool,
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    LIGHT_COLORS[rng.gen_range(0..LIGHT_COLORS.len())]
}

/// Cards the opponent has to take right away for `value`, outside of the stack.
pub fn immediate_draw(value: Value, mode: Mode, rules: &RulesConfig) -> usize {
    match (value, mode) {
        (Value::Reverse, Mode::Mercy) => rules.mercy_reverse_draw,
        _ => 0,
    }
}

/// Applies the effect of `face`, just played by `actor`, to `state`.
///
/// Only one draw source applies per card. A stacking value replaces any previous stack rather than
/// adding to it, and the draw itself is deferred: the opponent must answer with the same kind or
/// take `pending.amount` cards.
pub fn resolve<R: Rng + ?Sized>(
    state: &mut GameState,
    face: Face,
    actor: Seat,
    choice: ColorChoice,
    rules: &RulesConfig,
    rng: &mut R,
) -> Resolution {
    let mut resolution = Resolution::default();

    match face.value {
        Value::Skip => resolution.skip_opponent = true,
        // No third seat to reverse onto, so reverse is a skip.
        Value::Reverse => {
            resolution.skip_opponent = true;
            resolution.forced_draw = immediate_draw(face.value, state.mode, rules);
        }
        _ => {}
    }

    state.pending = face.value.draw_amount().map(|amount| {
        resolution.skip_opponent = true;
        Pending { amount, kind: face.value }
    });

    if resolution.forced_draw > 0 {
        let target = actor.other();
        let drawn = state.draw_into(target, resolution.forced_draw, rng);
        tracing::debug!(%actor, %target, drawn, "reverse forced an immediate draw");
    }

    if face.is_wild() {
        match choice {
            ColorChoice::Declared(color) => state.chosen_color = Some(color),
            ColorChoice::Random => state.chosen_color = Some(random_color(rng)),
            ColorChoice::Prompt => {
                state.chosen_color = None;
                resolution.awaiting_color = true;
            }
        }
    } else {
        state.chosen_color = None;
    }

    resolution
}
