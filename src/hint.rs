//! Hint engine: surface one suggested move for a short time.
//!
//! Hints reuse the visible-move finder (evaluator checks 1–3, no lookahead).
//! When nothing visible qualifies the suggestion is to draw, unless stock
//! and waste are both empty.

use log::debug;

use crate::card::Card;
use crate::moves::Move;
use crate::search;
use crate::table::Table;
use crate::timer::Timer;

/// What the hint engine suggests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suggestion {
    /// Play `card` (the first card of the run `mv` moves).
    Play { mv: Move, card: Card },
    /// Nothing visible can move; draw from the stock (or recycle).
    Draw,
    /// Nothing visible can move and there is nothing to draw.
    NoMove,
}

impl Suggestion {
    pub fn text(&self) -> String {
        match self {
            Suggestion::Play { card, .. } => format!("Hint: {}", card.label()),
            Suggestion::Draw => "Hint: draw".to_string(),
            Suggestion::NoMove => "Hint: no moves".to_string(),
        }
    }
}

/// Pick the suggestion for the current table.
pub fn suggest(table: &Table) -> Suggestion {
    search::find_visible_move(table)
        .and_then(|mv| mv.card(table).map(|card| Suggestion::Play { mv, card }))
        .unwrap_or_else(|| {
            if table.stock().is_empty() && table.waste().is_empty() {
                Suggestion::NoMove
            } else {
                Suggestion::Draw
            }
        })
}

/// The currently displayed hint and its revert timer.
#[derive(Clone, Debug, Default)]
pub struct HintEngine {
    active: Option<Suggestion>,
    timer: Timer,
}

impl HintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a hint, show it for `duration_ms` from `now_ms` (restarting
    /// any pending revert) and return its display text.
    pub fn request(&mut self, table: &Table, now_ms: u64, duration_ms: u64) -> String {
        let suggestion = suggest(table);
        debug!("hint: {suggestion:?}");
        self.active = Some(suggestion);
        self.timer.start(now_ms, duration_ms);
        suggestion.text()
    }

    /// Revert an expired hint. Returns `true` if one was cleared.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.timer.fire_if_due(now_ms) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> Option<&Suggestion> {
        self.active.as_ref()
    }

    pub fn text(&self) -> Option<String> {
        self.active.map(|s| s.text())
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::pile::NUM_TABLEAUS;

    #[test]
    fn suggests_the_visible_card() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[3] = vec![Card::face_up(Suit::Heart, Rank::Ace)];
        let table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), t);

        let mut hints = HintEngine::new();
        assert_eq!(hints.request(&table, 0, 2_000), "Hint: A♥");
        assert!(matches!(
            hints.active(),
            Some(Suggestion::Play {
                mv: Move::TableauToFoundation { src: 3, dst: 0 },
                ..
            })
        ));
    }

    #[test]
    fn falls_back_to_draw_and_reverts() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[0] = vec![Card::face_up(Suit::Spade, Rank::Nine)];
        let table = Table::from_parts(
            vec![Card::new(Suit::Club, Rank::Two)],
            Vec::new(),
            Default::default(),
            t,
        );

        let mut hints = HintEngine::new();
        assert_eq!(hints.request(&table, 500, 2_000), "Hint: draw");
        assert!(!hints.tick(2_499));
        assert_eq!(hints.text().as_deref(), Some("Hint: draw"));

        // A second request restarts the revert window.
        hints.request(&table, 2_000, 2_000);
        assert!(!hints.tick(2_500));
        assert!(hints.tick(4_000));
        assert_eq!(hints.text(), None);
    }

    #[test]
    fn nothing_to_draw_is_not_a_draw_hint() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[0] = vec![Card::face_up(Suit::Spade, Rank::Nine)];
        let empty = Table::from_parts(Vec::new(), Vec::new(), Default::default(), t.clone());
        assert_eq!(suggest(&empty), Suggestion::NoMove);
        assert_eq!(suggest(&empty).text(), "Hint: no moves");

        // A waste that can still be recycled counts as something to draw.
        let waste = vec![Card::face_up(Suit::Club, Rank::Two)];
        let recyclable = Table::from_parts(Vec::new(), waste, Default::default(), t);
        assert_eq!(suggest(&recyclable), Suggestion::Draw);
    }
}
