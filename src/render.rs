//! Drawing a snapshot onto a host-provided surface.
//!
//! The surface only knows two primitives. Which bitmap a [`CardImage`] maps
//! to is the host's business; the engine never builds asset names.

use crate::card::{Rank, Suit};
use crate::layout::Rect;
use crate::snapshot::{CardFace, Snapshot};

/// Typed key for a card image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardImage {
    Face { suit: Suit, rank: Rank, large_text: bool },
    Back { style: u8 },
}

impl CardImage {
    pub fn for_face(face: CardFace, large_text: bool) -> Self {
        if face.face_up {
            CardImage::Face {
                suit: face.suit,
                rank: face.rank,
                large_text,
            }
        } else {
            CardImage::Back {
                style: face.back_style,
            }
        }
    }
}

/// Drawing primitives provided by the host.
pub trait RenderSurface {
    fn draw_image(&mut self, rect: Rect, image: CardImage);
    fn draw_outline(&mut self, rect: Rect, radius: f32);
}

/// Draw one frame: an outline for every empty pile slot, every pile's
/// cards bottom to top, then the dragged run on top.
pub fn render(snapshot: &Snapshot, surface: &mut dyn RenderSurface) {
    for pile in &snapshot.piles {
        if pile.cards.is_empty() {
            surface.draw_outline(pile.slot, snapshot.corner_radius);
        }
        for sprite in &pile.cards {
            surface.draw_image(sprite.rect, CardImage::for_face(sprite.face, snapshot.large_text));
        }
    }
    for sprite in &snapshot.dragged {
        surface.draw_image(sprite.rect, CardImage::for_face(sprite.face, snapshot.large_text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::standard_deck;
    use crate::config::Geometry;
    use crate::layout::Layout;
    use crate::prefs::Preferences;
    use crate::selection::Selection;
    use crate::snapshot::SnapshotContext;
    use crate::table::Table;

    #[derive(Default)]
    struct Recorder {
        images: Vec<CardImage>,
        outlines: usize,
    }

    impl RenderSurface for Recorder {
        fn draw_image(&mut self, _rect: Rect, image: CardImage) {
            self.images.push(image);
        }

        fn draw_outline(&mut self, _rect: Rect, _radius: f32) {
            self.outlines += 1;
        }
    }

    #[test]
    fn fresh_deal_draws_52_cards_and_five_outlines() {
        let layout = Layout::new(Geometry::default());
        let selection = Selection::new();
        let table = Table::deal_from_shuffled(standard_deck());
        let snap = crate::snapshot::Snapshot::build(
            &table,
            SnapshotContext {
                layout: &layout,
                prefs: Preferences::default(),
                selection: &selection,
                status: String::new(),
                hint: None,
                won: false,
                stuck: false,
                unrevealed_waste: 0,
            },
        );

        let mut surface = Recorder::default();
        render(&snap, &mut surface);
        assert_eq!(surface.images.len(), 52);
        // Waste and the four foundations start empty.
        assert_eq!(surface.outlines, 5);
        let faces = surface
            .images
            .iter()
            .filter(|i| matches!(i, CardImage::Face { .. }))
            .count();
        assert_eq!(faces, 7);
        assert!(surface.images.contains(&CardImage::Back { style: 1 }));
    }
}
