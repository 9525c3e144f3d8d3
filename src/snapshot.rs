//! Renderable snapshot of the whole game.
//!
//! A snapshot is plain data: per pile, the slot rectangle and each card's
//! (suit, rank, face_up, back style) with its rectangle, plus the run being
//! dragged and the status/hint text. It never names an asset.

use crate::card::{Card, Rank, Suit};
use crate::layout::{Layout, Rect};
use crate::pile::PileId;
use crate::prefs::Preferences;
use crate::selection::Selection;
use crate::table::Table;

/// What to show for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
    pub back_style: u8,
}

impl CardFace {
    fn of(card: Card, face_up: bool, back_style: u8) -> Self {
        CardFace {
            suit: card.suit,
            rank: card.rank,
            face_up,
            back_style,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSprite {
    pub face: CardFace,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PileView {
    pub id: PileId,
    pub slot: Rect,
    /// Bottom to top.
    pub cards: Vec<CardSprite>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// All 13 piles, stock first.
    pub piles: Vec<PileView>,
    /// The run in flight, drawn above everything else.
    pub dragged: Vec<CardSprite>,
    pub status: String,
    pub hint: Option<String>,
    pub won: bool,
    pub stuck: bool,
    pub large_text: bool,
    pub corner_radius: f32,
}

/// Inputs for [`Snapshot::build`] besides the table itself.
pub struct SnapshotContext<'a> {
    pub layout: &'a Layout,
    pub prefs: Preferences,
    pub selection: &'a Selection,
    pub status: String,
    pub hint: Option<String>,
    pub won: bool,
    pub stuck: bool,
    /// Top waste cards whose draw animation has not revealed them yet;
    /// they are shown face-down on the stock slot.
    pub unrevealed_waste: usize,
}

impl Snapshot {
    pub fn build(table: &Table, ctx: SnapshotContext<'_>) -> Snapshot {
        let layout = ctx.layout;
        let large = ctx.prefs.large_text;
        let style = ctx.prefs.back_style.index();
        let stock_slot = layout.slot_rect(PileId::Stock);

        let piles = PileId::all()
            .map(|id| {
                let pile = table.pile(id);
                let rects = layout.card_rects(table, id, large);
                let hidden_from = match id {
                    PileId::Waste => pile.len().saturating_sub(ctx.unrevealed_waste),
                    _ => pile.len(),
                };
                let cards = pile
                    .cards()
                    .iter()
                    .zip(rects)
                    .enumerate()
                    .map(|(i, (&card, rect))| {
                        if i >= hidden_from {
                            CardSprite {
                                face: CardFace::of(card, false, style),
                                rect: stock_slot,
                            }
                        } else {
                            CardSprite {
                                face: CardFace::of(card, card.face_up, style),
                                rect,
                            }
                        }
                    })
                    .collect();
                PileView {
                    id,
                    slot: layout.slot_rect(id),
                    cards,
                }
            })
            .collect();

        let dragged = match ctx.selection.drag() {
            Some(drag) => {
                let g = layout.geometry();
                let first = drag.first_card_rect(g.card_width, g.card_height);
                let step = if large {
                    g.face_up_offset * g.large_text_factor
                } else {
                    g.face_up_offset
                };
                drag.run()
                    .cards()
                    .iter()
                    .enumerate()
                    .map(|(i, &card)| CardSprite {
                        face: CardFace::of(card, card.face_up, style),
                        rect: first.translate(0.0, i as f32 * step),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Snapshot {
            piles,
            dragged,
            status: ctx.status,
            hint: ctx.hint,
            won: ctx.won,
            stuck: ctx.stuck,
            large_text: large,
            corner_radius: layout.geometry().corner_radius,
        }
    }

    pub fn pile(&self, id: PileId) -> Option<&PileView> {
        self.piles.iter().find(|p| p.id == id)
    }

    /// Cards in piles plus cards in flight; always 52.
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(|p| p.cards.len()).sum::<usize>() + self.dragged.len()
    }
}
