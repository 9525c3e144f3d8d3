//! Canonical fixed 52-card deals used in tests and by the demo binary.
//!
//! Goals:
//!   * Provide a mathematically-defined "no-moves" (unplayable) deal that
//!     does **not** rely on any solver.
//!   * Provide the plain ordered deck as a fixed, readable deal.
//!
//! This module does not depend on the evaluator. It only works with
//! Card/Suit/Rank and known Klondike accessibility conditions.

use crate::card::{Card, DECK_LEN, Rank, Suit, standard_deck};

/// In our dealing model (column-major, 1..7 cards per column), the
/// face-up top card in column c (0-based) is at index T(c+1) − 1 where
/// T(n) = n(n+1)/2.
///
/// That gives these 7 indices for the 7 accessible tableau cards:
///   0, 2, 5, 9, 14, 20, 27.
pub fn accessible_tableau_indices() -> [usize; 7] {
    [0, 2, 5, 9, 14, 20, 27]
}

/// With 24 stock cards and draw-3, the cards that can ever appear on top
/// of the waste without playing a waste card are stock positions
///   2,5,8,11,14,17,20,23 (0-based, in draw order).
///
/// The stock is drawn starting at deck index 28, so these are:
///   28 + [2,5,8,11,14,17,20,23] = [30,33,36,39,42,45,48,51].
pub fn accessible_stock_indices() -> [usize; 8] {
    [30, 33, 36, 39, 42, 45, 48, 51]
}

/// Build a deck which is "unplayable" in the sense of de Ruiter / Kortsmit:
///
/// 1. None of the 7 accessible tableau cards is an Ace.
/// 2. None of the 8 accessible stock cards is an Ace.
/// 3. No two accessible tableau cards of opposite colour differ by rank 1.
/// 4. No accessible stock card has rank one less than an accessible
///    tableau card of opposite colour.
///
/// Under these conditions (draw-3, unlimited recycles) no legal card move
/// exists from the initial state, no matter how often the stock is cycled.
fn unplayable_deck_by_local_conditions() -> [Card; DECK_LEN] {
    // Forced assignments for the 15 "accessible" cards.
    //
    // 7 tableau tops (indices 0,2,5,9,14,20,27):
    //   5♣, 7♣, 9♣, J♣, 5♠, 7♠, 9♠
    //
    // 8 stock-accessible cards (indices 30,33,36,39,42,45,48,51):
    //   3♣, 3♠, 7♦, 7♥, J♦, J♥, K♦, K♥
    //
    // All these ranks are odd and separated by ≥2, and no column is
    // empty, so none of them can move anywhere.
    const FORCED: &[(usize, Suit, Rank)] = &[
        // Tableau tops
        (0, Suit::Club, Rank::Five),
        (2, Suit::Club, Rank::Seven),
        (5, Suit::Club, Rank::Nine),
        (9, Suit::Club, Rank::Jack),
        (14, Suit::Spade, Rank::Five),
        (20, Suit::Spade, Rank::Seven),
        (27, Suit::Spade, Rank::Nine),
        // Stock-accessible
        (30, Suit::Club, Rank::Three),
        (33, Suit::Spade, Rank::Three),
        (36, Suit::Diamond, Rank::Seven),
        (39, Suit::Heart, Rank::Seven),
        (42, Suit::Diamond, Rank::Jack),
        (45, Suit::Heart, Rank::Jack),
        (48, Suit::Diamond, Rank::King),
        (51, Suit::Heart, Rank::King),
    ];

    let mut slots: [Option<Card>; DECK_LEN] = [None; DECK_LEN];
    for &(idx, suit, rank) in FORCED {
        slots[idx] = Some(Card::new(suit, rank));
    }

    // Fill the remaining 37 positions in standard order.
    let mut rest = standard_deck()
        .into_iter()
        .filter(|c| !FORCED.iter().any(|&(_, s, r)| c.suit == s && c.rank == r));
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        *slot = rest.next();
    }

    let mut deck = standard_deck();
    for (dst, slot) in deck.iter_mut().zip(slots) {
        if let Some(card) = slot {
            *dst = card;
        }
    }
    deck
}

/// Purely local check of the "unplayable" conditions for a given deck.
///
/// This encodes the conditions used to build the unplayable deck and
/// serves as both documentation and a regression test for it.
pub fn is_unplayable_by_local_conditions(deck: &[Card; DECK_LEN]) -> bool {
    let tab_cards: Vec<Card> = accessible_tableau_indices().iter().map(|&i| deck[i]).collect();
    let stock_cards: Vec<Card> = accessible_stock_indices().iter().map(|&i| deck[i]).collect();

    // 1 & 2: no Aces among accessible cards.
    if tab_cards.iter().chain(stock_cards.iter()).any(|c| c.rank == Rank::Ace) {
        return false;
    }

    // 3: no two tableau tops of opposite colour with rank diff 1.
    for (i, &a) in tab_cards.iter().enumerate() {
        for &b in &tab_cards[i + 1..] {
            let diff = a.rank.number().abs_diff(b.rank.number());
            if a.color() != b.color() && diff == 1 {
                return false;
            }
        }
    }

    // 4: no stock-accessible card can be stacked onto a tableau-accessible
    //    card (rank one less and opposite colour).
    for &s in &stock_cards {
        for &t in &tab_cards {
            if s.color() != t.color() && s.rank.number() + 1 == t.rank.number() {
                return false;
            }
        }
    }

    true
}

/// Canonical "no-moves" deal: only the stock can be clicked, and after
/// one full pass through it the game is provably stuck.
pub fn canonical_unplayable_deck() -> [Card; DECK_LEN] {
    unplayable_deck_by_local_conditions()
}

/// The ordered deck (Clubs, Diamonds, Hearts, Spades; Ace..King). Its deal
/// code is 0.
pub fn canonical_ordered_deck() -> [Card; DECK_LEN] {
    standard_deck()
}
