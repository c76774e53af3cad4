use std::fmt::Write;

use crate::action::Action;
use crate::card::{Card, Side};
use crate::deck::Mode;
use crate::state::{GameStateView, RoundStatus, WinCause};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Show both faces of dual cards instead of only the active one.
    pub show_both_faces: bool,
    pub show_pile_sizes: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_both_faces: true,
            show_pile_sizes: true,
        }
    }
}

/// Active face of `card`, plus the inactive face in flip mode when asked for.
pub fn format_card(card: &Card, side: Side, show_both_faces: bool) -> String {
    match card {
        Card::Dual { front, back } if show_both_faces => {
            let active = card.face(side);
            format!("{}/{} ({})", front.value, back.value, active.color)
        }
        _ => card.face(side).to_string(),
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        RoundStatus::Ongoing => String::from("Ongoing"),
        RoundStatus::Won {
            winner,
            cause: WinCause::EmptiedHand,
        } => format!("Finished (winner: {winner})"),
        RoundStatus::Won {
            winner,
            cause: WinCause::OverLimit,
        } => format!("Finished (winner: {winner}, opponent over the hand limit)"),
    };
    let _ = writeln!(out, "Round status: {status}");
    let mut line = format!(
        "Mode {} | Turn: {}{}",
        state.mode.as_str().to_ascii_uppercase(),
        state.turn,
        if state.turn == state.self_seat { " (You)" } else { "" }
    );
    if let Some(pending) = state.pending {
        let _ = write!(line, " | Stack: {} ({})", pending.kind, pending.amount);
    }
    let _ = writeln!(out, "{line}");
    let top = state.top_face();
    let _ = writeln!(
        out,
        "Top card: {} {}{}",
        state.current_color,
        top.value,
        if state.chosen_color.is_some() { " (declared)" } else { "" }
    );
    if state.mode == Mode::Flip {
        let _ = writeln!(out, "Side: {:?}", state.side);
    }
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard: {}  |  Timer: {}",
            state.draw_pile_count, state.discard_count, state.timer_remaining
        );
    }
    let _ = writeln!(out, "Opponent holds {} card(s)", state.opponent_hand_size);
    if state.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries = state
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| format!("{idx}:{}", format_card(card, state.side, options.show_both_faces)))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "Hand: {entries}");
    }
    if state.uno_called {
        let _ = writeln!(out, "UNO called");
    }
    out
}

pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Play { index, color } => {
            let card = state
                .hand
                .get(*index)
                .map(|card| format_card(card, state.side, false))
                .unwrap_or_else(|| String::from("??"));
            match color {
                Some(color) => format!("Play {card} (hand {index}) as {color}"),
                None => format!("Play {card} (hand {index})"),
            }
        }
        Action::Draw => match state.pending {
            Some(pending) => format!("Draw {} and pass", pending.amount),
            None => String::from("Draw 1 and pass"),
        },
        Action::CallUno => String::from("Call UNO"),
        Action::ChooseColor(color) => format!("Declare {color}"),
    }
}
