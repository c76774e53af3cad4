use std::io::{self, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Color, LIGHT_COLORS};
use crate::state::GameStateView;
use crate::visualize::{describe_action, render_state};

/// Interactive seat that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, label: &str) -> Option<String> {
        print!("{label}");
        if io::stdout().flush().is_err() {
            eprintln!("failed to flush stdout");
        }
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(_) => {
                eprintln!("failed to read input");
                Some(String::new())
            }
        }
    }

    fn ask_color(&self) -> Color {
        loop {
            let Some(answer) = self.prompt("Wild color (red/blue/green/yellow): ") else {
                return LIGHT_COLORS[0];
            };
            match answer.parse::<Color>() {
                Ok(color) if LIGHT_COLORS.contains(&color) => return color,
                _ => println!("Please type one of red, blue, green or yellow."),
            }
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        loop {
            println!("\n=== {}'s turn ({}) ===", self.name, state.self_seat);
            println!("{}", render_state(state));
            println!("Available actions:");
            for (index, action) in legal_actions.iter().enumerate() {
                println!("  [{index}] {}", describe_action(state, action));
            }
            println!("Type the action index, 'help' or 'q' to quit.");
            let Some(trimmed) = self.prompt("Selection: ") else {
                return Action::Draw;
            };
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            if trimmed.eq_ignore_ascii_case("help") {
                println!("Enter the numeric index listed next to the action you wish to perform.");
                println!("Wild cards ask for a color after you pick them.");
                continue;
            }
            let Ok(choice) = trimmed.parse::<usize>() else {
                println!("Invalid input: '{trimmed}'. Please enter a number.");
                continue;
            };
            let Some(action) = legal_actions.get(choice).copied() else {
                println!("Index out of range. Please choose a valid option.");
                continue;
            };
            if let Action::Play { index, color: None } = action {
                if state.face(index).is_some_and(|face| face.is_wild()) {
                    return Action::Play {
                        index,
                        color: Some(self.ask_color()),
                    };
                }
            }
            println!("You selected: {}", describe_action(state, &action));
            return action;
        }
    }
}
