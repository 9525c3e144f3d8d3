//! Game-state evaluation: win detection and "is any move left?" detection.
//!
//! The evaluator runs after every completed transfer, draw and recycle. Once
//! it decides the game is stuck, the verdict is sticky until the next deal.
//!
//! Stock exhaustion is tracked with a counting heuristic rather than a
//! reachability search: a draw cycle starts at the first draw after the last
//! waste card was played, capturing the stock + waste size at that moment;
//! the cycle is exhausted once that many cards have been drawn without any
//! waste card being played. Tableau-only moves do not restart the count.

use log::info;

use crate::search;
use crate::table::Table;

/// Bookkeeping for draw-cycle exhaustion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawCycle {
    /// Stock + waste size when the current cycle began, if one has begun.
    cycle_total: Option<usize>,
    /// Cards drawn since the cycle began.
    drawn: usize,
}

impl DrawCycle {
    /// Record a draw of `count` cards; `stock_and_waste` is the combined
    /// stock + waste size just before the draw.
    pub fn on_draw(&mut self, count: usize, stock_and_waste: usize) {
        if self.cycle_total.is_none() {
            self.cycle_total = Some(stock_and_waste);
            self.drawn = 0;
        }
        self.drawn += count;
    }

    /// A waste card reached a foundation or tableau: start over.
    pub fn on_waste_used(&mut self) {
        *self = DrawCycle::default();
    }

    pub fn reset(&mut self) {
        *self = DrawCycle::default();
    }

    /// A whole pass through stock and waste has gone by without playing a
    /// waste card.
    pub fn is_exhausted(&self) -> bool {
        self.cycle_total.is_some_and(|total| self.drawn >= total)
    }

    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn cycle_total(&self) -> Option<usize> {
        self.cycle_total
    }
}

/// Which check showed that the game can go on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// A tableau top card can go to a foundation.
    TableauToFoundation,
    /// A tableau run can usefully move to another tableau.
    TableauToTableau,
    /// The playable waste card has a destination.
    FromWaste,
    /// A tableau move would uncover a foundation card.
    Lookahead,
    /// Cards remain in the stock.
    StockNotEmpty,
    /// The stock is empty but the waste has not been cycled through yet.
    CycleNotExhausted,
}

/// Run the checks in order and report the first one that holds, or `None`
/// if no move remains.
pub fn remaining_progress(table: &Table, cycle: &DrawCycle) -> Option<Progress> {
    if search::tableau_to_foundation(table).is_some() {
        return Some(Progress::TableauToFoundation);
    }
    if search::tableau_to_tableau(table).is_some() {
        return Some(Progress::TableauToTableau);
    }
    if search::from_waste(table).is_some() {
        return Some(Progress::FromWaste);
    }
    if search::lookahead_move(table).is_some() {
        return Some(Progress::Lookahead);
    }
    if !table.stock().is_empty() {
        return Some(Progress::StockNotEmpty);
    }
    if !table.waste().is_empty() && !cycle.is_exhausted() {
        return Some(Progress::CycleNotExhausted);
    }
    None
}

pub fn any_move_remains(table: &Table, cycle: &DrawCycle) -> bool {
    remaining_progress(table, cycle).is_some()
}

/// Overall game status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Stuck,
}

/// Sticky win/stuck tracking for one game.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    cycle: DrawCycle,
    won: bool,
    stuck: bool,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(&self) -> &DrawCycle {
        &self.cycle
    }

    pub fn cycle_mut(&mut self) -> &mut DrawCycle {
        &mut self.cycle
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    pub fn status(&self) -> GameStatus {
        if self.won {
            GameStatus::Won
        } else if self.stuck {
            GameStatus::Stuck
        } else {
            GameStatus::Playing
        }
    }

    /// Re-evaluate after a mutation. Returns the status only when it changed
    /// on this call (i.e. the game just became won or stuck).
    pub fn evaluate(&mut self, table: &Table) -> Option<GameStatus> {
        if self.won || self.stuck {
            return None;
        }
        if table.is_won() {
            self.won = true;
            info!("all foundations complete: game won");
            return Some(GameStatus::Won);
        }
        if !any_move_remains(table, &self.cycle) {
            self.stuck = true;
            info!(
                "no moves left (drawn {} of {:?} since last waste play)",
                self.cycle.drawn(),
                self.cycle.cycle_total()
            );
            return Some(GameStatus::Stuck);
        }
        None
    }

    /// Forget everything for a new deal.
    pub fn reset(&mut self) {
        *self = Evaluator::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit, standard_deck};
    use crate::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS};

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::face_up(suit, rank)
    }

    #[test]
    fn cycle_exhausts_after_a_full_pass() {
        let mut cycle = DrawCycle::default();
        assert!(!cycle.is_exhausted());
        cycle.on_draw(3, 5);
        assert!(!cycle.is_exhausted());
        cycle.on_draw(2, 5);
        assert!(cycle.is_exhausted());
        cycle.on_waste_used();
        assert!(!cycle.is_exhausted());
        assert_eq!(cycle.cycle_total(), None);
    }

    #[test]
    fn cycle_total_is_captured_once() {
        let mut cycle = DrawCycle::default();
        cycle.on_draw(3, 9);
        cycle.on_draw(3, 6);
        assert_eq!(cycle.cycle_total(), Some(9));
        assert_eq!(cycle.drawn(), 6);
    }

    #[test]
    fn fresh_deal_has_moves() {
        let table = Table::deal_from_shuffled(standard_deck());
        assert!(any_move_remains(&table, &DrawCycle::default()));
    }

    #[test]
    fn stock_alone_keeps_the_game_alive() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[0] = vec![up(Suit::Spade, Rank::Nine)];
        let table = Table::from_parts(
            vec![Card::new(Suit::Heart, Rank::Four)],
            Vec::new(),
            Default::default(),
            t,
        );
        assert_eq!(
            remaining_progress(&table, &DrawCycle::default()),
            Some(Progress::StockNotEmpty)
        );
    }

    #[test]
    fn waste_without_exhausted_cycle_keeps_the_game_alive() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[0] = vec![up(Suit::Spade, Rank::Nine)];
        let table = Table::from_parts(
            Vec::new(),
            vec![up(Suit::Heart, Rank::Four), up(Suit::Club, Rank::Six)],
            Default::default(),
            t,
        );
        let mut cycle = DrawCycle::default();
        assert_eq!(remaining_progress(&table, &cycle), Some(Progress::CycleNotExhausted));
        cycle.on_draw(2, 2);
        assert_eq!(remaining_progress(&table, &cycle), None);
    }

    #[test]
    fn stuck_is_sticky_and_won_takes_priority() {
        let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        t[0] = vec![up(Suit::Spade, Rank::Nine)];
        let table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), t);

        let mut eval = Evaluator::new();
        assert_eq!(eval.evaluate(&table), Some(GameStatus::Stuck));
        assert_eq!(eval.evaluate(&table), None);
        assert!(eval.is_stuck());
        assert_eq!(eval.status(), GameStatus::Stuck);

        let foundations: [Vec<Card>; NUM_FOUNDATIONS] = std::array::from_fn(|i| {
            Rank::ALL.iter().map(|&r| up(Suit::ALL[i], r)).collect()
        });
        let done = Table::from_parts(Vec::new(), Vec::new(), foundations, Default::default());
        let mut eval = Evaluator::new();
        assert_eq!(eval.evaluate(&done), Some(GameStatus::Won));
        assert!(eval.is_won());
        assert!(!eval.is_stuck());
    }
}
