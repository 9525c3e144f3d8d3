//! Pointer input state machine.
//!
//! `Idle -> Selecting` on pointer-down over a pickable card (the run is
//! lifted out of its pile right away), `Selecting -> Dragging` once the
//! pointer travels past the drag threshold, and pointer-up resolves the
//! gesture as a tap or a drop. The caller owns the table; this module only
//! tracks the gesture and the run in flight.

use crate::layout::Rect;
use crate::table::Run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A raw pointer event in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        PointerEvent { kind: PointerKind::Down, x, y, time_ms }
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        PointerEvent { kind: PointerKind::Move, x, y, time_ms }
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        PointerEvent { kind: PointerKind::Up, x, y, time_ms }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting,
    Dragging,
}

/// A gesture in progress, holding the lifted run.
#[derive(Clone, Debug)]
pub struct Drag {
    run: Run,
    start: (f32, f32),
    start_ms: u64,
    pointer: (f32, f32),
    /// Offset from the pointer to the run's first card's top-left corner.
    grab: (f32, f32),
    dragging: bool,
}

impl Drag {
    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current rectangle of the run's first card.
    pub fn first_card_rect(&self, w: f32, h: f32) -> Rect {
        Rect::new(self.pointer.0 + self.grab.0, self.pointer.1 + self.grab.1, w, h)
    }
}

/// How a gesture ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Release {
    /// Short, motionless press: auto-move the run.
    Tap(Run),
    /// Drop the run at the given point.
    Drop { run: Run, x: f32, y: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct Selection {
    drag: Option<Drag>,
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        match &self.drag {
            None => SelectionState::Idle,
            Some(d) if d.dragging => SelectionState::Dragging,
            Some(_) => SelectionState::Selecting,
        }
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.drag.is_none()
    }

    /// Start a gesture holding `run`, grabbed at (`x`, `y`) on a card drawn
    /// at `card_rect`.
    pub fn begin(&mut self, run: Run, x: f32, y: f32, time_ms: u64, card_rect: Rect) {
        self.drag = Some(Drag {
            run,
            start: (x, y),
            start_ms: time_ms,
            pointer: (x, y),
            grab: (card_rect.x - x, card_rect.y - y),
            dragging: false,
        });
    }

    /// Track pointer motion. Returns `true` if this move started a drag.
    pub fn on_move(&mut self, x: f32, y: f32, threshold: f32) -> bool {
        match self.drag.as_mut() {
            Some(d) => {
                d.pointer = (x, y);
                if !d.dragging && distance(d.start, d.pointer) > threshold {
                    d.dragging = true;
                    return true;
                }
                false
            }
            None => false,
        }
    }

    /// End the gesture. A press that never became a drag, ended within
    /// `threshold` of where it began and lasted at most `tap_max_ms` is a
    /// tap; anything else is a drop at the release point.
    pub fn finish(
        &mut self,
        x: f32,
        y: f32,
        time_ms: u64,
        threshold: f32,
        tap_max_ms: u64,
    ) -> Option<Release> {
        let d = self.drag.take()?;
        let still = !d.dragging && distance(d.start, (x, y)) <= threshold;
        let quick = time_ms.saturating_sub(d.start_ms) <= tap_max_ms;
        if still && quick {
            Some(Release::Tap(d.run))
        } else {
            Some(Release::Drop { run: d.run, x, y })
        }
    }

    /// Abandon the gesture, handing back the run so it can be returned.
    pub fn cancel(&mut self) -> Option<Run> {
        self.drag.take().map(|d| d.run)
    }
}
