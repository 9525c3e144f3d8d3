//! Screen geometry of the 13 piles and hit-testing.
//!
//! Top row: stock, waste, a blank column, then the four foundations.
//! Bottom row: the seven tableaus, fanned downwards.

use crate::config::Geometry;
use crate::pile::{NUM_TABLEAUS, PileId};
use crate::table::Table;

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow on every side by `pad`.
    pub fn expand(&self, pad: f32) -> Rect {
        Rect::new(self.x - pad, self.y - pad, self.w + 2.0 * pad, self.h + 2.0 * pad)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// What a point landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// A card, by pile and index (the topmost card under the point).
    Card { pile: PileId, index: usize },
    /// An empty part of a pile slot.
    Slot(PileId),
}

impl Hit {
    pub fn pile(&self) -> PileId {
        match *self {
            Hit::Card { pile, .. } | Hit::Slot(pile) => pile,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    geometry: Geometry,
}

impl Layout {
    pub fn new(geometry: Geometry) -> Self {
        Layout { geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn column_x(&self, col: usize) -> f32 {
        let g = &self.geometry;
        g.margin + col as f32 * (g.card_width + g.gap)
    }

    fn tableau_top(&self) -> f32 {
        let g = &self.geometry;
        g.margin + g.card_height + 2.0 * g.gap
    }

    /// The empty-slot rectangle of a pile.
    pub fn slot_rect(&self, pile: PileId) -> Rect {
        let g = &self.geometry;
        let (x, y) = match pile {
            PileId::Stock => (self.column_x(0), g.margin),
            PileId::Waste => (self.column_x(1), g.margin),
            PileId::Foundation(i) => (self.column_x(NUM_TABLEAUS - 4 + i as usize), g.margin),
            PileId::Tableau(i) => (self.column_x(i as usize), self.tableau_top()),
        };
        Rect::new(x, y, g.card_width, g.card_height)
    }

    /// Vertical step between a tableau card and the next one above it.
    fn fan_step(&self, face_up: bool, large_text: bool) -> f32 {
        let g = &self.geometry;
        if !face_up {
            g.face_down_offset
        } else if large_text {
            g.face_up_offset * g.large_text_factor
        } else {
            g.face_up_offset
        }
    }

    /// One rectangle per card of `pile`, bottom to top.
    pub fn card_rects(&self, table: &Table, pile: PileId, large_text: bool) -> Vec<Rect> {
        let slot = self.slot_rect(pile);
        let cards = table.pile(pile).cards();
        match pile {
            PileId::Stock | PileId::Foundation(_) => vec![slot; cards.len()],
            PileId::Waste => {
                let group_start = table.waste_group_start().min(cards.len());
                (0..cards.len())
                    .map(|i| {
                        if i < group_start {
                            slot
                        } else {
                            let fan = (i - group_start) as f32;
                            slot.translate(fan * self.geometry.waste_offset, 0.0)
                        }
                    })
                    .collect()
            }
            PileId::Tableau(_) => {
                let mut y = 0.0;
                cards
                    .iter()
                    .map(|card| {
                        let rect = slot.translate(0.0, y);
                        y += self.fan_step(card.face_up, large_text);
                        rect
                    })
                    .collect()
            }
        }
    }

    /// Where a run lands if placed on top of `pile`: the rect its first
    /// card would occupy.
    pub fn next_card_rect(&self, table: &Table, pile: PileId, large_text: bool) -> Rect {
        let rects = self.card_rects(table, pile, large_text);
        match (pile, rects.last(), table.pile(pile).top()) {
            (PileId::Tableau(_), Some(last), Some(top)) => {
                last.translate(0.0, self.fan_step(top.face_up, large_text))
            }
            _ => self.slot_rect(pile),
        }
    }

    /// Slot plus every card: the area that counts as "on this pile".
    pub fn pile_bounds(&self, table: &Table, pile: PileId, large_text: bool) -> Rect {
        self.card_rects(table, pile, large_text)
            .iter()
            .fold(self.slot_rect(pile), |acc, r| acc.union(r))
    }

    /// Topmost card or slot under the point.
    pub fn hit_test(&self, table: &Table, x: f32, y: f32, large_text: bool) -> Option<Hit> {
        for pile in PileId::all() {
            let rects = self.card_rects(table, pile, large_text);
            if let Some(index) = rects.iter().rposition(|r| r.contains(x, y)) {
                return Some(Hit::Card { pile, index });
            }
            if self.slot_rect(pile).contains(x, y) {
                return Some(Hit::Slot(pile));
            }
        }
        None
    }

    /// First drop target (foundations, then tableaus) whose padded bounds
    /// contain the point and which accepts the run starting with `first`.
    pub fn drop_target(
        &self,
        table: &Table,
        x: f32,
        y: f32,
        padding: f32,
        large_text: bool,
        accepts: impl Fn(PileId) -> bool,
    ) -> Option<PileId> {
        PileId::drop_targets().find(|&pile| {
            self.pile_bounds(table, pile, large_text).expand(padding).contains(x, y) && accepts(pile)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::standard_deck;

    fn layout() -> Layout {
        Layout::new(Geometry::default())
    }

    #[test]
    fn rect_contains_and_expand() {
        let r = Rect::new(10.0, 10.0, 20.0, 30.0);
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(30.0, 10.0));
        assert!(r.expand(5.0).contains(32.0, 5.0));
        assert_eq!(r.union(&Rect::new(0.0, 0.0, 1.0, 1.0)), Rect::new(0.0, 0.0, 30.0, 40.0));
    }

    #[test]
    fn tableau_cards_fan_downwards() {
        let l = layout();
        let table = Table::deal_from_shuffled(standard_deck());
        let rects = l.card_rects(&table, PileId::Tableau(6), false);
        assert_eq!(rects.len(), 7);
        let g = Geometry::default();
        assert_eq!(rects[1].y - rects[0].y, g.face_down_offset);

        let large = l.next_card_rect(&table, PileId::Tableau(6), true);
        let small = l.next_card_rect(&table, PileId::Tableau(6), false);
        assert!(large.y > small.y);
    }

    #[test]
    fn hit_test_finds_topmost_card() {
        let l = layout();
        let table = Table::deal_from_shuffled(standard_deck());
        let top = *l.card_rects(&table, PileId::Tableau(3), false).last().unwrap();
        let hit = l.hit_test(&table, top.x + 2.0, top.bottom() - 2.0, false);
        assert_eq!(hit, Some(Hit::Card { pile: PileId::Tableau(3), index: 3 }));

        let waste = l.slot_rect(PileId::Waste);
        assert_eq!(l.hit_test(&table, waste.x + 1.0, waste.y + 1.0, false), Some(Hit::Slot(PileId::Waste)));
    }

    #[test]
    fn drop_target_prefers_accepting_pile_within_padding() {
        let l = layout();
        let table = Table::new_empty();
        let f0 = l.slot_rect(PileId::Foundation(0));
        let near = (f0.x - 10.0, f0.y + 5.0);
        assert_eq!(
            l.drop_target(&table, near.0, near.1, 24.0, false, |_| true),
            Some(PileId::Foundation(0))
        );
        assert_eq!(l.drop_target(&table, near.0, near.1, 0.0, false, |_| true), None);
        assert_eq!(l.drop_target(&table, near.0, near.1, 24.0, false, |_| false), None);
    }
}
