use serde::{Deserialize, Serialize};

/// Per-turn countdown driven by external ticks. Restarted by every successful play or draw.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnTimer {
    limit: u32,
    remaining: u32,
}

impl TurnTimer {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.limit;
    }

    /// Counts one tick down. Returns true exactly when the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
