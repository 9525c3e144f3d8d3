//! Piles and the two placement predicates.
//!
//! A pile is an ordered stack of cards, index 0 at the bottom. Placement
//! legality only ever looks at the *first* card of an incoming run and the
//! destination's top card (or its emptiness).

use std::fmt;

use crate::card::{Card, Rank, is_one_lower_opposite_color};

/// Number of foundation piles.
pub const NUM_FOUNDATIONS: usize = 4;
/// Number of tableau piles.
pub const NUM_TABLEAUS: usize = 7;

/// Which pile of the layout this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PileId {
    Stock,
    Waste,
    /// Foundation slot 0..=3.
    Foundation(u8),
    /// Tableau column 0..=6.
    Tableau(u8),
}

impl PileId {
    /// Every pile in enumeration order: stock, waste, foundations, tableaus.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..NUM_FOUNDATIONS as u8).map(PileId::Foundation))
            .chain((0..NUM_TABLEAUS as u8).map(PileId::Tableau))
    }

    /// Drop destinations in the order they are tried: foundations left to
    /// right, then tableaus left to right.
    pub fn drop_targets() -> impl Iterator<Item = PileId> {
        (0..NUM_FOUNDATIONS as u8)
            .map(PileId::Foundation)
            .chain((0..NUM_TABLEAUS as u8).map(PileId::Tableau))
    }

    pub fn is_foundation(self) -> bool {
        matches!(self, PileId::Foundation(_))
    }

    pub fn is_tableau(self) -> bool {
        matches!(self, PileId::Tableau(_))
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => f.write_str("Stock"),
            PileId::Waste => f.write_str("Waste"),
            PileId::Foundation(i) => write!(f, "Foundation {}", i + 1),
            PileId::Tableau(i) => write!(f, "Column {}", i + 1),
        }
    }
}

/// An ordered container of cards. Cards are moved in and out by value, so
/// a card is only ever owned by one pile (or one in-flight run) at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pile {
    id: PileId,
    cards: Vec<Card>,
}

impl Pile {
    pub fn new(id: PileId) -> Self {
        Pile {
            id,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(id: PileId, cards: Vec<Card>) -> Self {
        Pile { id, cards }
    }

    pub fn id(&self) -> PileId {
        self.id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Index of the first face-up card, or `len()` if none are face-up.
    ///
    /// For a tableau this is the size of the face-down prefix.
    pub fn face_up_start(&self) -> usize {
        self.cards
            .iter()
            .position(|c| c.face_up)
            .unwrap_or(self.cards.len())
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn extend(&mut self, run: Vec<Card>) {
        self.cards.extend(run);
    }

    /// Remove and return the cards from `start` to the top.
    pub fn split_off(&mut self, start: usize) -> Vec<Card> {
        let start = start.min(self.cards.len());
        self.cards.split_off(start)
    }

    /// Remove every card, leaving the pile empty.
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Flip the top card face-up if it is face-down. Returns whether a flip
    /// happened.
    pub fn reveal_top(&mut self) -> bool {
        match self.cards.last_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }

    /// Whether a run of `run_len` cards starting with `first` may be placed
    /// here. Stock and waste never accept placements.
    pub fn accepts(&self, first: Card, run_len: usize) -> bool {
        match self.id {
            PileId::Foundation(_) => run_len == 1 && foundation_accepts(self, first),
            PileId::Tableau(_) => run_len >= 1 && tableau_accepts(self, first),
            PileId::Stock | PileId::Waste => false,
        }
    }
}

/// Foundation rule: an Ace on an empty foundation, otherwise the next rank
/// of the same suit as the top card.
pub fn foundation_accepts(foundation: &Pile, card: Card) -> bool {
    match foundation.top() {
        None => card.rank == Rank::Ace,
        Some(top) => card.suit == top.suit && top.rank.next() == Some(card.rank),
    }
}

/// Tableau rule: a King on an empty column, otherwise one rank lower and the
/// opposite color of a face-up top card.
pub fn tableau_accepts(tableau: &Pile, first: Card) -> bool {
    match tableau.top() {
        None => first.rank == Rank::King,
        Some(top) => top.face_up && is_one_lower_opposite_color(first, top),
    }
}
