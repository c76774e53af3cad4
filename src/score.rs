//! Match scoring across rounds.
//!
//! Scoring rule: the round winner gets one point, whatever the cause (emptied hand or the
//! opponent crossing the mercy limit). The round counter starts at 1 and advances every time a
//! new round is started after the first.

use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::state::RoundStatus;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scoreboard {
    pub round: u32,
    pub wins: [u32; 2],
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            round: 1,
            wins: [0, 0],
        }
    }
}

impl Scoreboard {
    pub fn wins(&self, seat: Seat) -> u32 {
        self.wins[seat.index()]
    }

    pub fn next_round(&mut self) {
        self.round += 1;
    }

    /// Credits the winner of a finished round. Returns the winner, if any.
    pub fn record(&mut self, status: RoundStatus) -> Option<Seat> {
        match status {
            RoundStatus::Won { winner, .. } => {
                self.wins[winner.index()] += 1;
                Some(winner)
            }
            RoundStatus::Ongoing => None,
        }
    }
}
