//! Card, Suit, Rank and Color types for a standard 52-card deck.
//!
//! - A card's identity is its (suit, rank) pair, compactly indexed 0..=51.
//! - `face_up` is the only mutable state a card carries; it is owned by
//!   whichever pile currently holds the card.

use core::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;
/// Deck length as `usize`, for array sizes.
pub const DECK_LEN: usize = CARDS_PER_DECK as usize;

/// The four suits, in the fixed order used for indexing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

/// The thirteen ranks. Ace is the lowest (ordinal 1), King the highest (13).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 13
}

/// A playing card: identity plus its current face state.
///
/// Equality and hashing compare identity *and* face state; use
/// [`Card::index`] or [`Card::same_identity`] to compare identity only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    /// A face-down card of the given suit and rank.
    #[inline]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            face_up: false,
        }
    }

    /// A face-up card of the given suit and rank.
    #[inline]
    pub const fn face_up(suit: Suit, rank: Rank) -> Self {
        Card {
            suit,
            rank,
            face_up: true,
        }
    }

    /// Build a face-down card from a raw index in 0..=51.
    ///
    /// The mapping is:
    /// ```text
    /// index = suit as u8 * 13 + (rank as u8 - 1)
    /// ```
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        if index >= CARDS_PER_DECK {
            return None;
        }
        Some(Card::new(
            Suit::ALL[(index / NUM_RANKS) as usize],
            Rank::ALL[(index % NUM_RANKS) as usize],
        ))
    }

    /// Raw 0..=51 identity index of this card.
    #[inline]
    pub fn index(self) -> u8 {
        self.suit as u8 * NUM_RANKS + (self.rank as u8 - 1)
    }

    #[inline]
    pub fn same_identity(self, other: Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    #[inline]
    pub fn color(self) -> Color {
        self.suit.color()
    }

    #[inline]
    pub fn is_red(self) -> bool {
        self.color() == Color::Red
    }

    /// Copy of this card with the given face state.
    #[inline]
    pub fn with_face_up(self, face_up: bool) -> Self {
        Card { face_up, ..self }
    }

    /// Short string like "AH", "7C", "TD", "KS".
    pub fn short_str(self) -> String {
        format!("{}{}", self.rank.short_char(), self.suit.short_char())
    }

    /// Rank and suit symbol, e.g. "10♥" or "Q♠". Used for hint text.
    pub fn label(self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; NUM_SUITS as usize] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Suit::Heart | Suit::Diamond => Color::Red,
            Suit::Club | Suit::Spade => Color::Black,
        }
    }

    /// Single-character representation: 'C', 'D', 'H' or 'S'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl Rank {
    /// All ranks, Ace..King.
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Rank from its ordinal 1..=13.
    #[inline]
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=NUM_RANKS).contains(&n) {
            Some(Rank::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    /// Rank ordinal in 1..=13 (Ace=1, King=13).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// The rank directly above this one, if any.
    #[inline]
    pub fn next(self) -> Option<Self> {
        Rank::from_number(self.number() + 1)
    }

    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Human label: "A", "2".."10", "J", "Q", "K".
    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Tableau building rule: can `upper` be placed directly on `lower`?
///
/// True if `upper` is exactly one rank lower than `lower` and of the
/// opposite color.
#[inline]
pub fn is_one_lower_opposite_color(upper: Card, lower: Card) -> bool {
    upper.rank.number() + 1 == lower.rank.number() && upper.color() != lower.color()
}

/// A standard 52-card deck, face-down, in index order.
pub fn standard_deck() -> [Card; DECK_LEN] {
    let mut cards = [Card::new(Suit::Club, Rank::Ace); DECK_LEN];
    let mut i = 0usize;
    for &suit in Suit::ALL.iter() {
        for &rank in Rank::ALL.iter() {
            cards[i] = Card::new(suit, rank);
            i += 1;
        }
    }
    cards
}

/// A uniformly shuffled standard deck (Fisher–Yates via `SliceRandom`).
///
/// Pass a seeded RNG (e.g. `StdRng::seed_from_u64`) for reproducible deals.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> [Card; DECK_LEN] {
    let mut deck = standard_deck();
    deck.shuffle(rng);
    deck
}
