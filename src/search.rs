//! Move finders used by the game-state evaluator and the hint engine.
//!
//! These are deliberately narrower than `moves::legal_moves`: they only
//! report moves that make progress, in a fixed priority order, and stop at
//! the first hit.
//!
//!   1. a tableau top card that can go to a foundation,
//!   2. a tableau run that can go to another tableau (minus two
//!      non-progressing cases),
//!   3. the playable waste card going to a foundation or tableau,
//!   4. one-ply lookahead: a tableau move that would uncover a card that can
//!      then go to a foundation.

use crate::moves::{Move, foundation_for};
use crate::pile::{NUM_TABLEAUS, PileId};
use crate::table::Table;

/// Check 1: some tableau's face-up top card is foundation-legal.
pub fn tableau_to_foundation(table: &Table) -> Option<Move> {
    table.tableaus().iter().enumerate().find_map(|(src, col)| {
        let top = col.top().filter(|c| c.face_up)?;
        foundation_for(table, top).map(|dst| Move::TableauToFoundation { src: src as u8, dst })
    })
}

/// Whether moving the run at `start` of tableau `src` onto tableau `dst` is
/// legal at all.
fn tableau_run_fits(table: &Table, src: usize, start: usize, dst: usize) -> bool {
    let col = &table.tableaus()[src];
    src != dst && table.tableaus()[dst].accepts(col.cards()[start], col.len() - start)
}

/// Whether a legal tableau-to-tableau move is one of the two provably
/// non-progressing cases:
///   (a) a whole column (nothing underneath) onto an empty column, or
///   (b) onto a top card of the same rank as the face-up card directly
///       beneath the run in its source.
fn is_degenerate(table: &Table, src: usize, start: usize, dst: usize) -> bool {
    let col = &table.tableaus()[src];
    let dest = &table.tableaus()[dst];
    match (start.checked_sub(1).map(|i| col.cards()[i]), dest.top()) {
        (None, None) => true,
        (Some(beneath), Some(dest_top)) => beneath.face_up && beneath.rank == dest_top.rank,
        _ => false,
    }
}

/// Every tableau-to-tableau move that is legal and not degenerate, in
/// source-column, run-start, destination-column order.
pub fn progressing_tableau_moves(table: &Table) -> impl Iterator<Item = Move> + '_ {
    (0..NUM_TABLEAUS).flat_map(move |src| {
        let col = &table.tableaus()[src];
        (col.face_up_start()..col.len()).flat_map(move |start| {
            (0..NUM_TABLEAUS)
                .filter(move |&dst| {
                    tableau_run_fits(table, src, start, dst) && !is_degenerate(table, src, start, dst)
                })
                .map(move |dst| Move::TableauToTableau {
                    src: src as u8,
                    start,
                    dst: dst as u8,
                })
        })
    })
}

/// Check 2: some face-up run can make progress on another tableau.
pub fn tableau_to_tableau(table: &Table) -> Option<Move> {
    progressing_tableau_moves(table).next()
}

/// Check 3: the playable waste card can go to a foundation or a tableau.
pub fn from_waste(table: &Table) -> Option<Move> {
    let card = table.waste_playable()?;
    if let Some(dst) = foundation_for(table, card) {
        return Some(Move::WasteToFoundation { dst });
    }
    (0..NUM_TABLEAUS as u8)
        .find(|&dst| table.pile(PileId::Tableau(dst)).accepts(card, 1))
        .map(|dst| Move::WasteToTableau { dst })
}

/// Checks 1–3 in order: the first move available from visible cards only.
pub fn find_visible_move(table: &Table) -> Option<Move> {
    tableau_to_foundation(table)
        .or_else(|| tableau_to_tableau(table))
        .or_else(|| from_waste(table))
}

/// Check 4 (one-ply lookahead): some legal tableau-to-tableau move, once
/// made, leaves a source top card that can go to a foundation.
///
/// Unlike check 2 this also considers the degenerate same-rank moves, since
/// uncovering a foundation card is progress even when the run itself only
/// trades places.
pub fn lookahead_move(table: &Table) -> Option<Move> {
    for src in 0..NUM_TABLEAUS {
        let col = &table.tableaus()[src];
        for start in col.face_up_start().max(1)..col.len() {
            for dst in 0..NUM_TABLEAUS {
                if !tableau_run_fits(table, src, start, dst) {
                    continue;
                }
                let mv = Move::TableauToTableau {
                    src: src as u8,
                    start,
                    dst: dst as u8,
                };
                let mut next = table.clone();
                if !mv.apply(&mut next) {
                    continue;
                }
                let exposed = next.tableaus()[src].top();
                if exposed.is_some_and(|c| foundation_for(&next, c).is_some()) {
                    return Some(mv);
                }
            }
        }
    }
    None
}
