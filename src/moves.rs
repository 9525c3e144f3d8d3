//! Move representation and move generation for Klondike (draw-3, unlimited
//! recycles).
//!
//! This module defines a compact `Move` type, generates every legal move
//! from a `Table`, and applies a chosen move to a table in place. The
//! evaluator and hint engine use the narrower finders in `search`; the full
//! generator is for autoplay and tests.

use crate::card::Card;
use crate::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS, PileId};
use crate::table::{StockAction, Table};

/// The different move types in Klondike.
///
/// Pile indices are 0-based internally and printed 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Move the face-up run starting at `start` of tableau `src` onto
    /// tableau `dst`.
    TableauToTableau { src: u8, start: usize, dst: u8 },

    /// Move the top card of tableau `src` to foundation `dst`.
    TableauToFoundation { src: u8, dst: u8 },

    /// Move the playable waste card to tableau `dst`.
    WasteToTableau { dst: u8 },

    /// Move the playable waste card to foundation `dst`.
    WasteToFoundation { dst: u8 },

    /// Draw up to three cards from the stock.
    Draw,

    /// Turn the waste back into the stock.
    Recycle,
}

impl Move {
    /// Source pile and index of the first moved card, for card moves.
    pub fn source(&self, table: &Table) -> Option<(PileId, usize)> {
        match *self {
            Move::TableauToTableau { src, start, .. } => Some((PileId::Tableau(src), start)),
            Move::TableauToFoundation { src, .. } => {
                let len = table.tableaus()[src as usize].len();
                len.checked_sub(1).map(|top| (PileId::Tableau(src), top))
            }
            Move::WasteToTableau { .. } | Move::WasteToFoundation { .. } => {
                table.waste().len().checked_sub(1).map(|top| (PileId::Waste, top))
            }
            Move::Draw | Move::Recycle => None,
        }
    }

    pub fn destination(&self) -> Option<PileId> {
        match *self {
            Move::TableauToTableau { dst, .. } | Move::WasteToTableau { dst } => {
                Some(PileId::Tableau(dst))
            }
            Move::TableauToFoundation { dst, .. } | Move::WasteToFoundation { dst } => {
                Some(PileId::Foundation(dst))
            }
            Move::Draw | Move::Recycle => None,
        }
    }

    /// The card this move picks up (the first card of the run).
    pub fn card(&self, table: &Table) -> Option<Card> {
        let (pile, index) = self.source(table)?;
        table.pile(pile).cards().get(index).copied()
    }

    /// Apply this move to the table. Returns `false` (leaving the table
    /// unchanged) if the move is not legal in the current state.
    pub fn apply(&self, table: &mut Table) -> bool {
        match self {
            Move::Draw => {
                if table.stock().is_empty() {
                    return false;
                }
                matches!(table.stock_click(), StockAction::Drew(_))
            }
            Move::Recycle => {
                if !table.stock().is_empty() || table.waste().is_empty() {
                    return false;
                }
                matches!(table.stock_click(), StockAction::Recycled(_))
            }
            _ => match (self.source(table), self.destination()) {
                (Some((from, index)), Some(to)) => table.transfer(from, index, to).is_some(),
                _ => false,
            },
        }
    }

    /// Render a move as a human-readable string using the given table to
    /// name the moved card.
    pub fn describe(&self, table: &Table) -> String {
        let card = self
            .card(table)
            .map(|c| c.short_str())
            .unwrap_or_else(|| "--".to_string());
        match *self {
            Move::TableauToTableau { src, start, dst } => {
                let col = &table.tableaus()[src as usize];
                if start + 1 >= col.len() {
                    format!("Column {}: {} -> Column {}", src + 1, card, dst + 1)
                } else {
                    let bottom = col.top().map(|c| c.short_str()).unwrap_or_default();
                    format!("Column {}: {}..{} -> Column {}", src + 1, card, bottom, dst + 1)
                }
            }
            Move::TableauToFoundation { src, dst } => {
                format!("Column {}: {} -> Foundation {}", src + 1, card, dst + 1)
            }
            Move::WasteToTableau { dst } => format!("Waste: {} -> Column {}", card, dst + 1),
            Move::WasteToFoundation { dst } => format!("Waste: {} -> Foundation {}", card, dst + 1),
            Move::Draw => "Draw from Stock".to_string(),
            Move::Recycle => "Recycle Waste into Stock".to_string(),
        }
    }
}

/// First foundation (in index order) that accepts `card`.
pub fn foundation_for(table: &Table, card: Card) -> Option<u8> {
    (0..NUM_FOUNDATIONS as u8).find(|&i| table.pile(PileId::Foundation(i)).accepts(card, 1))
}

/// Generate every legal move from the given table.
///
/// Card moves come first (foundation moves, then tableau moves, then waste
/// moves), followed by the stock move that is currently available. Moves
/// are not filtered for usefulness.
pub fn legal_moves(table: &Table) -> Vec<Move> {
    let mut moves = Vec::new();

    // Tableau -> Foundation
    for (src, col) in table.tableaus().iter().enumerate() {
        if let Some(top) = col.top().filter(|c| c.face_up) {
            if let Some(dst) = foundation_for(table, top) {
                moves.push(Move::TableauToFoundation { src: src as u8, dst });
            }
        }
    }

    // Tableau -> Tableau (every face-up run start)
    for (src, col) in table.tableaus().iter().enumerate() {
        for start in col.face_up_start()..col.len() {
            let first = col.cards()[start];
            for dst in 0..NUM_TABLEAUS {
                if dst == src {
                    continue;
                }
                if table.tableaus()[dst].accepts(first, col.len() - start) {
                    moves.push(Move::TableauToTableau {
                        src: src as u8,
                        start,
                        dst: dst as u8,
                    });
                }
            }
        }
    }

    // Waste -> Foundation / Tableau
    if let Some(card) = table.waste_playable() {
        if let Some(dst) = foundation_for(table, card) {
            moves.push(Move::WasteToFoundation { dst });
        }
        for dst in 0..NUM_TABLEAUS as u8 {
            if table.pile(PileId::Tableau(dst)).accepts(card, 1) {
                moves.push(Move::WasteToTableau { dst });
            }
        }
    }

    if !table.stock().is_empty() {
        moves.push(Move::Draw);
    } else if !table.waste().is_empty() {
        moves.push(Move::Recycle);
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit, standard_deck};

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::face_up(suit, rank)
    }

    fn down(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn every_generated_move_applies() {
        let table = Table::deal_from_shuffled(standard_deck());
        let moves = legal_moves(&table);
        assert!(moves.contains(&Move::Draw));
        for mv in moves {
            let mut copy = table.clone();
            assert!(mv.apply(&mut copy), "{} should apply", mv.describe(&table));
            assert_eq!(copy.check_invariants(), Ok(()));
        }
    }

    #[test]
    fn foundation_moves_pick_the_first_accepting_slot() {
        let mut foundations: [Vec<Card>; NUM_FOUNDATIONS] = Default::default();
        foundations[0] = vec![up(Suit::Heart, Rank::Ace)];
        let mut tableaus: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        tableaus[2] = vec![up(Suit::Club, Rank::Ace)];
        tableaus[4] = vec![down(Suit::Spade, Rank::Nine), up(Suit::Heart, Rank::Two)];
        let table = Table::from_parts(Vec::new(), Vec::new(), foundations, tableaus);

        let moves = legal_moves(&table);
        assert!(moves.contains(&Move::TableauToFoundation { src: 2, dst: 1 }));
        assert!(moves.contains(&Move::TableauToFoundation { src: 4, dst: 0 }));
    }

    #[test]
    fn illegal_move_is_refused_without_side_effects() {
        let mut tableaus: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        tableaus[0] = vec![up(Suit::Spade, Rank::Queen)];
        tableaus[1] = vec![up(Suit::Spade, Rank::Jack)];
        let mut table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), tableaus);
        let before = table.clone();

        let mv = Move::TableauToTableau {
            src: 1,
            start: 0,
            dst: 0,
        };
        assert!(!mv.apply(&mut table));
        assert_eq!(table, before);
        assert!(!Move::Draw.apply(&mut table));
        assert!(!Move::Recycle.apply(&mut table));
    }

    #[test]
    fn describe_names_cards_and_piles() {
        let mut tableaus: [Vec<Card>; NUM_TABLEAUS] = Default::default();
        tableaus[0] = vec![up(Suit::Heart, Rank::Eight), up(Suit::Spade, Rank::Seven)];
        tableaus[1] = vec![up(Suit::Club, Rank::Nine)];
        let table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), tableaus);

        let run = Move::TableauToTableau {
            src: 0,
            start: 0,
            dst: 1,
        };
        assert_eq!(run.describe(&table), "Column 1: 8H..7S -> Column 2");
        assert_eq!(Move::Draw.describe(&table), "Draw from Stock");
    }
}
