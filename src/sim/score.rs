//! Session scoring: pop count, combo multiplier, best score

use serde::{Deserialize, Serialize};

/// Score state for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Bubbles popped this session
    pub pop_count: u32,
    /// Combo multiplier (always >= 1)
    pub combo: u32,
    /// Best pop count ever seen (historical, survives `reset_session`)
    pub best: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Scoreboard {
    pub fn new(best: u32) -> Self {
        Self {
            pop_count: 0,
            combo: 1,
            best,
        }
    }

    /// Record a pop. Returns true if it set a new best.
    pub fn record_pop(&mut self) -> bool {
        self.pop_count += 1;
        self.combo += 1;
        if self.pop_count > self.best {
            self.best = self.pop_count;
            return true;
        }
        false
    }

    /// Inactivity timeout elapsed
    pub fn expire_combo(&mut self) {
        self.combo = 1;
    }

    /// Explicit stop: clears the session, keeps the best
    pub fn reset_session(&mut self) {
        self.pop_count = 0;
        self.combo = 1;
    }
}
