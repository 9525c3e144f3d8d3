//! The full Klondike layout: stock, waste, 4 foundations and 7 tableaus.
//!
//! All card movement goes through this type:
//!   - `deal_from_shuffled` builds a fresh layout from a 52-card deck,
//!   - `draw` / `recycle` implement the stock mechanics,
//!   - `pick_up` / `place` / `return_run` implement transfers. Pickup
//!     removes the run from its source eagerly, so an aborted transfer is a
//!     return to source, never a copy.

use crate::card::{Card, DECK_LEN};
use crate::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS, Pile, PileId};

/// Cards moved from stock to waste per draw.
pub const DRAW_COUNT: usize = 3;

/// A run of cards in flight between piles. Owning the cards here is what
/// keeps pile membership exclusive while a drag is in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    source: PileId,
    source_index: usize,
    cards: Vec<Card>,
}

impl Run {
    pub fn source(&self) -> PileId {
        self.source
    }

    /// Index the run's first card had in its source pile.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn first(&self) -> Card {
        // Runs are never empty: `pick_up` refuses to build one.
        self.cards[0]
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Result of a successful placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub from: PileId,
    pub to: PileId,
    pub card: Card,
    pub count: usize,
    /// A face-down tableau card was turned up in the source pile.
    pub revealed: bool,
}

/// What a click on the stock slot did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockAction {
    Drew(usize),
    Recycled(usize),
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    stock: Pile,
    waste: Pile,
    /// Waste index where the most recent draw batch begins.
    waste_group_start: usize,
    foundations: [Pile; NUM_FOUNDATIONS],
    tableaus: [Pile; NUM_TABLEAUS],
}

impl Default for Table {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Table {
    pub fn new_empty() -> Self {
        Table {
            stock: Pile::new(PileId::Stock),
            waste: Pile::new(PileId::Waste),
            waste_group_start: 0,
            foundations: std::array::from_fn(|i| Pile::new(PileId::Foundation(i as u8))),
            tableaus: std::array::from_fn(|i| Pile::new(PileId::Tableau(i as u8))),
        }
    }

    /// Deal a shuffled deck column-major: tableau `c` takes the next `c + 1`
    /// cards with only the last face-up, and the remaining 24 go to the
    /// stock so that `deck[28]` is drawn first.
    pub fn deal_from_shuffled(deck: [Card; DECK_LEN]) -> Self {
        let mut table = Table::new_empty();
        let mut next = 0usize;

        for (col, pile) in table.tableaus.iter_mut().enumerate() {
            for row in 0..=col {
                pile.push(deck[next].with_face_up(row == col));
                next += 1;
            }
        }

        for card in deck[next..].iter().rev() {
            table.stock.push(card.with_face_up(false));
        }

        table
    }

    /// Build an arbitrary layout from explicit piles (bottom to top, face
    /// states as given). The waste group is the top `DRAW_COUNT` cards.
    ///
    /// No invariants are enforced; see [`Table::check_invariants`].
    pub fn from_parts(
        stock: Vec<Card>,
        waste: Vec<Card>,
        foundations: [Vec<Card>; NUM_FOUNDATIONS],
        tableaus: [Vec<Card>; NUM_TABLEAUS],
    ) -> Self {
        let waste_group_start = waste.len().saturating_sub(DRAW_COUNT);
        let mut foundations = foundations.into_iter();
        let mut tableaus = tableaus.into_iter();
        Table {
            stock: Pile::with_cards(PileId::Stock, stock),
            waste: Pile::with_cards(PileId::Waste, waste),
            waste_group_start,
            foundations: std::array::from_fn(|i| {
                Pile::with_cards(PileId::Foundation(i as u8), foundations.next().unwrap_or_default())
            }),
            tableaus: std::array::from_fn(|i| {
                Pile::with_cards(PileId::Tableau(i as u8), tableaus.next().unwrap_or_default())
            }),
        }
    }

    // ----- Accessors -----

    pub fn pile(&self, id: PileId) -> &Pile {
        match id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Foundation(i) => &self.foundations[i as usize],
            PileId::Tableau(i) => &self.tableaus[i as usize],
        }
    }

    fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Foundation(i) => &mut self.foundations[i as usize],
            PileId::Tableau(i) => &mut self.tableaus[i as usize],
        }
    }

    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    pub fn foundations(&self) -> &[Pile; NUM_FOUNDATIONS] {
        &self.foundations
    }

    pub fn tableaus(&self) -> &[Pile; NUM_TABLEAUS] {
        &self.tableaus
    }

    pub fn waste_group_start(&self) -> usize {
        self.waste_group_start
    }

    /// The interactable part of the waste: the most recent draw batch.
    pub fn waste_group(&self) -> &[Card] {
        let start = self.waste_group_start.min(self.waste.len());
        &self.waste.cards()[start..]
    }

    /// The only waste card that may be picked up: the top of the current
    /// group, if the group is non-empty.
    pub fn waste_playable(&self) -> Option<Card> {
        self.waste_group().last().copied()
    }

    /// Total number of cards across all piles.
    pub fn total_cards(&self) -> usize {
        PileId::all().map(|id| self.pile(id).len()).sum()
    }

    pub fn foundation_total(&self) -> usize {
        self.foundations.iter().map(Pile::len).sum()
    }

    /// All four foundations hold a full suit.
    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|f| f.len() == 13)
    }

    // ----- Stock mechanics -----

    /// Move up to three cards from the top of the stock to the waste,
    /// face-up, in draw order. The batch becomes the new waste group.
    pub fn draw(&mut self) -> usize {
        let batch_start = self.waste.len();
        let mut drawn = 0;
        while drawn < DRAW_COUNT {
            match self.stock.pop() {
                Some(card) => {
                    self.waste.push(card.with_face_up(true));
                    drawn += 1;
                }
                None => break,
            }
        }
        if drawn > 0 {
            self.waste_group_start = batch_start;
        }
        drawn
    }

    /// Turn the whole waste back into the stock, face-down, so that the
    /// first card ever drawn is drawn first again. Only legal when the
    /// stock is empty; returns how many cards moved.
    pub fn recycle(&mut self) -> usize {
        if !self.stock.is_empty() {
            return 0;
        }
        let cards = self.waste.take_all();
        let count = cards.len();
        for card in cards.into_iter().rev() {
            self.stock.push(card.with_face_up(false));
        }
        self.waste_group_start = 0;
        count
    }

    /// A click on the stock slot: draw if possible, otherwise recycle.
    pub fn stock_click(&mut self) -> StockAction {
        if !self.stock.is_empty() {
            StockAction::Drew(self.draw())
        } else if !self.waste.is_empty() {
            StockAction::Recycled(self.recycle())
        } else {
            StockAction::Nothing
        }
    }

    // ----- Transfers -----

    /// Whether the card at `index` of pile `id` starts a pickable run.
    pub fn is_pickable(&self, id: PileId, index: usize) -> bool {
        let pile = self.pile(id);
        match id {
            PileId::Tableau(_) => index < pile.len() && index >= pile.face_up_start(),
            PileId::Waste => {
                index + 1 == pile.len() && index >= self.waste_group_start
            }
            PileId::Stock | PileId::Foundation(_) => false,
        }
    }

    /// Remove the run starting at `index` from pile `id`.
    ///
    /// Tableau runs are any face-up suffix; from the waste only the top
    /// card of the current group can be taken. Stock and foundation cards
    /// are never picked up.
    pub fn pick_up(&mut self, id: PileId, index: usize) -> Option<Run> {
        if !self.is_pickable(id, index) {
            return None;
        }
        let cards = self.pile_mut(id).split_off(index);
        Some(Run {
            source: id,
            source_index: index,
            cards,
        })
    }

    /// Try to append `run` to `dest`. On failure the run is handed back
    /// untouched so the caller can return it to its source.
    pub fn place(&mut self, run: Run, dest: PileId) -> Result<Placement, Run> {
        if run.is_empty() || dest == run.source || !self.pile(dest).accepts(run.first(), run.len()) {
            return Err(run);
        }

        let card = run.first();
        let count = run.len();
        let from = run.source;
        self.pile_mut(dest).extend(run.cards);

        let revealed = match from {
            PileId::Tableau(_) => self.pile_mut(from).reveal_top(),
            PileId::Waste => {
                // Once the current group is used up, the waste top becomes
                // the (single-card) group.
                if self.waste.len() <= self.waste_group_start {
                    self.waste_group_start = self.waste.len().saturating_sub(1);
                }
                false
            }
            _ => false,
        };

        Ok(Placement {
            from,
            to: dest,
            card,
            count,
            revealed,
        })
    }

    /// Put an aborted run back exactly where it came from.
    pub fn return_run(&mut self, run: Run) {
        let source = run.source;
        self.pile_mut(source).extend(run.cards);
    }

    /// Atomic pickup + place: either the whole run lands on `dest` or the
    /// table is left unchanged.
    pub fn transfer(&mut self, from: PileId, index: usize, dest: PileId) -> Option<Placement> {
        let run = self.pick_up(from, index)?;
        match self.place(run, dest) {
            Ok(placement) => Some(placement),
            Err(run) => {
                self.return_run(run);
                None
            }
        }
    }

    // ----- Invariants -----

    /// Verify the layout invariants: every card exactly once, foundations
    /// ascending single-suit from Ace, tableau face-up suffixes descending in
    /// alternating colors, face-down cards only in tableau prefixes and the
    /// stock, and a sane waste group.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = [false; DECK_LEN];
        for id in PileId::all() {
            for card in self.pile(id).cards() {
                let idx = card.index() as usize;
                if seen[idx] {
                    return Err(format!("card {card} appears more than once"));
                }
                seen[idx] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(format!("card index {missing} is missing"));
        }

        if self.stock.cards().iter().any(|c| c.face_up) {
            return Err("stock holds a face-up card".to_string());
        }
        if self.waste.cards().iter().any(|c| !c.face_up) {
            return Err("waste holds a face-down card".to_string());
        }
        if self.waste_group_start > self.waste.len()
            || self.waste.len() - self.waste_group_start > DRAW_COUNT
        {
            return Err(format!(
                "waste group starts at {} with {} waste cards",
                self.waste_group_start,
                self.waste.len()
            ));
        }

        for f in &self.foundations {
            for (i, card) in f.cards().iter().enumerate() {
                let expected_rank = i as u8 + 1;
                if !card.face_up
                    || card.rank.number() != expected_rank
                    || card.suit != f.cards()[0].suit
                {
                    return Err(format!("{} is out of order at {card}", f.id()));
                }
            }
        }

        for t in &self.tableaus {
            let start = t.face_up_start();
            let cards = t.cards();
            if cards[start..].iter().any(|c| !c.face_up) {
                return Err(format!("{} has a face-down card above a face-up one", t.id()));
            }
            if !cards.is_empty() && start == cards.len() {
                return Err(format!("{} has a face-down top card", t.id()));
            }
            for pair in cards[start..].windows(2) {
                if !crate::card::is_one_lower_opposite_color(pair[1], pair[0]) {
                    return Err(format!("{} breaks its run at {}", t.id(), pair[1]));
                }
            }
        }

        Ok(())
    }
}
