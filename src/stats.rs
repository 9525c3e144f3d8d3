/// Per-session game counters.
///
/// A game counts as played when it is dealt; it is then won, stuck, or
/// abandoned by dealing a new one.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub games_played: u64,
    pub games_won: u64,
    pub games_stuck: u64,
}

impl Stats {
    pub fn record_start(&mut self) {
        self.games_played += 1;
    }

    pub fn record_win(&mut self) {
        self.games_won += 1;
    }

    pub fn record_stuck(&mut self) {
        self.games_stuck += 1;
    }

    /// Games that ended neither won nor stuck (including one in progress).
    pub fn games_unfinished(&self) -> u64 {
        self.games_played
            .saturating_sub(self.games_won)
            .saturating_sub(self.games_stuck)
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}
