//! The engine facade: one game of Klondike driven by pointer events.
//!
//! `Engine` owns the table and every piece of per-game state (gesture in
//! flight, evaluator, hint and draw-stagger timers, counters) and talks to
//! the host only through injected collaborators: a [`Clock`], a
//! [`PreferenceStore`] and a [`Feedback`] sink. Every entry point is total;
//! an illegal drop is an ordinary outcome that puts the run back.
//!
//! After every completed transfer, draw and recycle the evaluator runs, and
//! the first time it reports won or stuck the feedback hook fires.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::card::{Card, DECK_LEN, shuffled_deck};
use crate::config::EngineConfig;
use crate::deal_code::DealCode;
use crate::error::EngineError;
use crate::evaluator::{Evaluator, GameStatus};
use crate::hint::{HintEngine, Suggestion};
use crate::layout::{Hit, Layout};
use crate::moves::Move;
use crate::pile::PileId;
use crate::prefs::{MemoryPrefs, PreferenceStore, Preferences};
use crate::selection::{PointerEvent, PointerKind, Release, Selection};
use crate::snapshot::{Snapshot, SnapshotContext};
use crate::stats::Stats;
use crate::table::{Placement, Run, StockAction, Table};
use crate::timer::{Clock, SystemClock, Timer};

/// Fire-and-forget signals for the host (haptics, sounds, dialogs).
pub trait Feedback {
    fn on_won(&mut self) {}
    fn on_stuck(&mut self) {}
}

/// Feedback sink that ignores everything.
#[derive(Debug, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {}

/// Builds an [`Engine`] and deals its first game.
pub struct EngineBuilder {
    config: EngineConfig,
    seed: Option<u64>,
    deal_code: Option<String>,
    clock: Box<dyn Clock>,
    prefs: Box<dyn PreferenceStore>,
    feedback: Box<dyn Feedback>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        EngineBuilder {
            config: EngineConfig::default(),
            seed: None,
            deal_code: None,
            clock: Box::new(SystemClock::new()),
            prefs: Box::new(MemoryPrefs::new()),
            feedback: Box::new(NoFeedback),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the shuffle so every `new_game` sequence is reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Deal this code first instead of a shuffled deck.
    pub fn deal_code(mut self, code: impl Into<String>) -> Self {
        self.deal_code = Some(code.into());
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn preference_store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.prefs = Box::new(store);
        self
    }

    pub fn feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let prefs = Preferences::load(self.prefs.as_ref());

        let mut engine = Engine {
            layout: Layout::new(self.config.geometry.clone()),
            config: self.config,
            table: Table::new_empty(),
            initial_deck: None,
            rng,
            clock: self.clock,
            prefs_store: self.prefs,
            feedback: self.feedback,
            prefs,
            selection: Selection::new(),
            evaluator: Evaluator::new(),
            hints: HintEngine::new(),
            stagger: Timer::default(),
            stagger_cards: 0,
            stats: Stats::default(),
            move_count: 0,
        };

        match self.deal_code {
            Some(code) => engine.new_game_from_code(&code)?,
            None => engine.new_game(),
        }
        Ok(engine)
    }
}

pub struct Engine {
    config: EngineConfig,
    layout: Layout,
    table: Table,
    /// Deck of the current deal; `None` after `load_table`.
    initial_deck: Option<[Card; DECK_LEN]>,
    rng: StdRng,
    clock: Box<dyn Clock>,
    prefs_store: Box<dyn PreferenceStore>,
    feedback: Box<dyn Feedback>,
    prefs: Preferences,
    selection: Selection,
    evaluator: Evaluator,
    hints: HintEngine,
    /// Draw animation: input is blocked while it runs.
    stagger: Timer,
    stagger_cards: usize,
    stats: Stats,
    move_count: u32,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    // ----- Game lifecycle -----

    /// Shuffle and deal a fresh game, cancelling anything in progress.
    pub fn new_game(&mut self) {
        let deck = shuffled_deck(&mut self.rng);
        self.new_game_with_deck(deck);
    }

    /// Replay the deal identified by `code`.
    pub fn new_game_from_code(&mut self, code: &str) -> Result<(), EngineError> {
        let code: DealCode = code.parse()?;
        let deck = code.to_deck()?;
        self.new_game_with_deck(deck);
        Ok(())
    }

    /// Deal a specific deck (top of the deck first, column-major).
    pub fn new_game_with_deck(&mut self, deck: [Card; DECK_LEN]) {
        self.reset_game_state();
        self.table = Table::deal_from_shuffled(deck);
        self.initial_deck = Some(deck);
        self.stats.record_start();
        match DealCode::from_deck(&deck) {
            Ok(code) => info!("new game dealt, deal code {code}"),
            Err(e) => warn!("new game dealt from an irregular deck: {e}"),
        }
        self.after_mutation();
    }

    /// Replace the layout with an arbitrary position, e.g. a puzzle or a
    /// test fixture. The position is evaluated immediately.
    pub fn load_table(&mut self, table: Table) {
        self.reset_game_state();
        self.table = table;
        self.initial_deck = None;
        self.stats.record_start();
        info!("loaded a custom layout");
        self.after_mutation();
    }

    fn reset_game_state(&mut self) {
        // An in-flight run belongs to the old table; dropping it is fine
        // because the whole table is rebuilt.
        let _ = self.selection.cancel();
        self.hints.cancel();
        self.stagger.cancel();
        self.stagger_cards = 0;
        self.evaluator.reset();
        self.move_count = 0;
    }

    /// Deal code of the current game, if it was dealt from a deck.
    pub fn deal_code(&self) -> Option<DealCode> {
        self.initial_deck
            .as_ref()
            .and_then(|deck| DealCode::from_deck(deck).ok())
    }

    // ----- Preferences -----

    /// Advance to the next card-back style (14 wraps to 1) and persist it.
    pub fn change_deck_style(&mut self) -> u8 {
        self.prefs.back_style = self.prefs.back_style.next();
        self.prefs.save(self.prefs_store.as_mut());
        debug!("card-back style is now {}", self.prefs.back_style.index());
        self.prefs.back_style.index()
    }

    /// Flip large-card-text mode and persist it.
    pub fn toggle_card_size_mode(&mut self) -> bool {
        self.prefs.large_text = !self.prefs.large_text;
        self.prefs.save(self.prefs_store.as_mut());
        debug!("large card text: {}", self.prefs.large_text);
        self.prefs.large_text
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn preference_store(&self) -> &dyn PreferenceStore {
        self.prefs_store.as_ref()
    }

    // ----- Hints and timers -----

    /// Show a hint for the configured duration and return its text.
    pub fn request_hint(&mut self) -> String {
        let now = self.clock.now_ms();
        self.hints
            .request(&self.table, now, self.config.hint_duration_ms)
    }

    pub fn current_hint(&self) -> Option<&Suggestion> {
        self.hints.active()
    }

    /// Expire the hint and the draw stagger if their time has come.
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let hint_cleared = self.hints.tick(now);
        let stagger_done = self.stagger.fire_if_due(now);
        if stagger_done {
            self.stagger_cards = 0;
        }
        hint_cleared || stagger_done
    }

    /// Whether the draw animation is still blocking pointer input.
    pub fn is_animating(&self) -> bool {
        self.stagger.is_running(self.clock.now_ms())
    }

    fn unrevealed_waste(&self) -> usize {
        let now = self.clock.now_ms();
        if !self.stagger.is_running(now) || self.config.draw_stagger_ms == 0 {
            return 0;
        }
        let total = self.stagger_cards as u64 * self.config.draw_stagger_ms;
        let elapsed = self.stagger.elapsed(now, total).unwrap_or(total);
        let revealed = (elapsed / self.config.draw_stagger_ms) as usize;
        self.stagger_cards.saturating_sub(revealed)
    }

    // ----- Input -----

    /// Feed one pointer event through the gesture state machine and return
    /// the resulting frame.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Snapshot {
        self.tick();
        match event.kind {
            PointerKind::Down => self.pointer_down(event),
            PointerKind::Move => {
                if self.selection.on_move(event.x, event.y, self.config.drag_threshold_px) {
                    debug!("drag started");
                }
            }
            PointerKind::Up => self.pointer_up(event),
        }
        self.snapshot()
    }

    fn pointer_down(&mut self, event: PointerEvent) {
        if self.settle_gesture() {
            warn!("pointer down during a gesture; returned the lifted run");
        }
        if self.is_animating() {
            debug!("pointer down ignored while the draw animation runs");
            return;
        }

        let large = self.prefs.large_text;
        let Some(hit) = self.layout.hit_test(&self.table, event.x, event.y, large) else {
            return;
        };
        match hit {
            Hit::Card { pile: PileId::Stock, .. } | Hit::Slot(PileId::Stock) => {
                self.click_stock();
            }
            Hit::Card { pile, index } if self.table.is_pickable(pile, index) => {
                let rects = self.layout.card_rects(&self.table, pile, large);
                let rect = rects[index];
                if let Some(run) = self.table.pick_up(pile, index) {
                    self.selection.begin(run, event.x, event.y, event.time_ms, rect);
                }
            }
            _ => {}
        }
    }

    fn pointer_up(&mut self, event: PointerEvent) {
        let release = self.selection.finish(
            event.x,
            event.y,
            event.time_ms,
            self.config.drag_threshold_px,
            self.config.tap_max_ms,
        );
        match release {
            Some(Release::Tap(run)) => {
                self.auto_move(run);
            }
            Some(Release::Drop { run, x, y }) => {
                self.drop_run(run, x, y);
            }
            None => {}
        }
    }

    /// Tap-to-move: the first foundation, then the first tableau, that
    /// accepts the run; otherwise the run goes back.
    fn auto_move(&mut self, run: Run) -> Option<Placement> {
        let source = run.source();
        let dest = PileId::drop_targets()
            .find(|&p| p != source && self.table.pile(p).accepts(run.first(), run.len()));
        match dest {
            Some(dest) => {
                let placed = self.table.place(run, dest);
                self.finish_placement(placed)
            }
            None => {
                debug!("tap on {}: no destination", run.first());
                self.table.return_run(run);
                None
            }
        }
    }

    fn drop_run(&mut self, run: Run, x: f32, y: f32) -> Option<Placement> {
        let source = run.source();
        let (first, len) = (run.first(), run.len());
        let table = &self.table;
        let dest = self.layout.drop_target(
            table,
            x,
            y,
            self.config.drop_padding_px,
            self.prefs.large_text,
            |p| p != source && table.pile(p).accepts(first, len),
        );
        match dest {
            Some(dest) => {
                let placed = self.table.place(run, dest);
                self.finish_placement(placed)
            }
            None => {
                debug!("drop of {first} matched no pile; returning to {source}");
                self.table.return_run(run);
                None
            }
        }
    }

    fn finish_placement(&mut self, placed: Result<Placement, Run>) -> Option<Placement> {
        match placed {
            Ok(p) => {
                debug!("{} x{}: {} -> {}", p.card, p.count, p.from, p.to);
                if p.from == PileId::Waste {
                    self.evaluator.cycle_mut().on_waste_used();
                }
                self.move_count += 1;
                self.after_mutation();
                Some(p)
            }
            Err(run) => {
                self.table.return_run(run);
                None
            }
        }
    }

    /// Put back any run the pointer is holding. Returns whether one was held.
    fn settle_gesture(&mut self) -> bool {
        match self.selection.cancel() {
            Some(run) => {
                self.table.return_run(run);
                true
            }
            None => false,
        }
    }

    // ----- Programmatic moves -----

    /// Click the stock slot: draw up to three cards, or recycle the waste
    /// when the stock is empty.
    pub fn click_stock(&mut self) -> StockAction {
        if self.settle_gesture() {
            debug!("stock click cancelled the gesture in progress");
        }
        let before = self.table.stock().len() + self.table.waste().len();
        let action = self.table.stock_click();
        match action {
            StockAction::Drew(n) => {
                debug!("drew {n} card(s)");
                self.evaluator.cycle_mut().on_draw(n, before);
                self.stagger_cards = n;
                self.stagger
                    .start(self.clock.now_ms(), n as u64 * self.config.draw_stagger_ms);
                self.move_count += 1;
                self.after_mutation();
            }
            StockAction::Recycled(n) => {
                debug!("recycled {n} card(s) into the stock");
                self.move_count += 1;
                self.after_mutation();
            }
            StockAction::Nothing => {}
        }
        action
    }

    /// Tap the card at `index` of `pile` (auto-move its run).
    pub fn tap(&mut self, pile: PileId, index: usize) -> Option<Placement> {
        if pile == PileId::Stock {
            self.click_stock();
            return None;
        }
        self.settle_gesture();
        let run = self.table.pick_up(pile, index)?;
        self.auto_move(run)
    }

    /// Move the run at `index` of `from` onto `to`, if legal.
    pub fn transfer(&mut self, from: PileId, index: usize, to: PileId) -> Option<Placement> {
        self.settle_gesture();
        let run = self.table.pick_up(from, index)?;
        let placed = self.table.place(run, to);
        self.finish_placement(placed)
    }

    /// Play a generated move. Returns whether it was applied.
    pub fn play(&mut self, mv: Move) -> bool {
        self.settle_gesture();
        match mv {
            Move::Draw => matches!(self.click_stock(), StockAction::Drew(_)),
            Move::Recycle => {
                self.table.stock().is_empty()
                    && !self.table.waste().is_empty()
                    && matches!(self.click_stock(), StockAction::Recycled(_))
            }
            _ => match (mv.source(&self.table), mv.destination()) {
                (Some((from, index)), Some(to)) => self.transfer(from, index, to).is_some(),
                _ => false,
            },
        }
    }

    fn after_mutation(&mut self) {
        // Partial layouts from `load_table` cannot pass the full-deck check.
        debug_assert!(
            self.table.total_cards() != DECK_LEN || self.table.check_invariants().is_ok(),
            "table invariants broken: {:?}",
            self.table.check_invariants()
        );
        match self.evaluator.evaluate(&self.table) {
            Some(GameStatus::Won) => {
                self.stats.record_win();
                self.feedback.on_won();
            }
            Some(GameStatus::Stuck) => {
                self.stats.record_stuck();
                self.feedback.on_stuck();
            }
            _ => {}
        }
    }

    // ----- Queries -----

    pub fn is_won(&self) -> bool {
        self.evaluator.is_won()
    }

    pub fn is_stuck(&self) -> bool {
        self.evaluator.is_stuck()
    }

    pub fn status(&self) -> GameStatus {
        self.evaluator.status()
    }

    /// The status line: an active hint, else the game state or move count.
    pub fn status_text(&self) -> String {
        if let Some(hint) = self.hints.text() {
            return hint;
        }
        match self.evaluator.status() {
            GameStatus::Won => "You won!".to_string(),
            GameStatus::Stuck => "No moves left".to_string(),
            GameStatus::Playing => format!("Moves: {}", self.move_count),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The current frame.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::build(
            &self.table,
            SnapshotContext {
                layout: &self.layout,
                prefs: self.prefs,
                selection: &self.selection,
                status: self.status_text(),
                hint: self.hints.text(),
                won: self.is_won(),
                stuck: self.is_stuck(),
                unrevealed_waste: self.unrevealed_waste(),
            },
        )
    }
}
