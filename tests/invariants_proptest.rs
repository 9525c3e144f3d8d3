/// Property-based tests for the table invariants using proptest
///
/// Random deals are driven by random pointer gestures, taps, stock clicks
/// and legal moves. After every step the 52 cards must all be accounted for
/// and the table must be in a valid shape.
use klondike_engine::moves::legal_moves;
use klondike_engine::pile::{NUM_TABLEAUS, PileId};
use klondike_engine::timer::{Clock, ManualClock};
use klondike_engine::{Engine, PointerEvent};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Action {
    Gesture { x0: f32, y0: f32, x1: f32, y1: f32, hold_ms: u64 },
    Tap { column: usize },
    Stock,
    Hint,
}

// Strategy to generate a point somewhere on or just off the table
fn point_strategy() -> impl Strategy<Value = (f32, f32)> {
    (-20.0f32..600.0, -20.0f32..700.0)
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (point_strategy(), point_strategy(), 0u64..800).prop_map(
            |((x0, y0), (x1, y1), hold_ms)| Action::Gesture { x0, y0, x1, y1, hold_ms }
        ),
        3 => (0..NUM_TABLEAUS).prop_map(|column| Action::Tap { column }),
        2 => Just(Action::Stock),
        1 => Just(Action::Hint),
    ]
}

fn new_engine(seed: u64, clock: &ManualClock) -> Engine {
    Engine::builder()
        .seed(seed)
        .clock(clock.clone())
        .build()
        .expect("default config is valid")
}

fn run_action(engine: &mut Engine, clock: &ManualClock, action: &Action) {
    // Past any draw animation so pointer input is accepted.
    clock.advance(1_000);
    let now = clock.now_ms();
    match *action {
        Action::Gesture { x0, y0, x1, y1, hold_ms } => {
            let snap = engine.handle_pointer_event(PointerEvent::down(x0, y0, now));
            assert_eq!(snap.card_count(), 52);
            let snap = engine.handle_pointer_event(PointerEvent::moved(x1, y1, now + hold_ms / 2));
            assert_eq!(snap.card_count(), 52);
            engine.handle_pointer_event(PointerEvent::up(x1, y1, now + hold_ms));
        }
        Action::Tap { column } => {
            let len = engine.table().tableaus()[column].len();
            if len > 0 {
                engine.tap(PileId::Tableau(column as u8), len - 1);
            }
        }
        Action::Stock => {
            engine.click_stock();
        }
        Action::Hint => {
            engine.request_hint();
        }
    }
}

proptest! {
    #[test]
    fn test_random_play_keeps_every_card(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..60),
    ) {
        let clock = ManualClock::new(0);
        let mut engine = new_engine(seed, &clock);
        let mut was_stuck = false;

        for action in &actions {
            run_action(&mut engine, &clock, action);

            prop_assert!(engine.selection().is_idle(), "gesture left a run lifted");
            prop_assert_eq!(engine.table().check_invariants(), Ok(()));
            prop_assert_eq!(engine.snapshot().card_count(), 52);

            // Once stuck, only a new game clears it.
            if was_stuck {
                prop_assert!(engine.is_stuck());
            }
            was_stuck = engine.is_stuck();
        }
    }

    #[test]
    fn test_random_legal_moves_keep_invariants(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..120),
    ) {
        let clock = ManualClock::new(0);
        let mut engine = new_engine(seed, &clock);

        for pick in &picks {
            let moves = legal_moves(engine.table());
            if moves.is_empty() {
                break;
            }
            let mv = moves[pick.index(moves.len())];
            prop_assert!(engine.play(mv), "legal move {:?} was refused", mv);
            prop_assert_eq!(engine.table().check_invariants(), Ok(()));
            prop_assert!(engine.table().foundation_total() <= 52);
        }
    }

    #[test]
    fn test_same_seed_same_deal(seed in any::<u64>()) {
        let clock = ManualClock::new(0);
        let a = new_engine(seed, &clock);
        let b = new_engine(seed, &clock);
        prop_assert_eq!(a.table(), b.table());
        prop_assert_eq!(a.deal_code(), b.deal_code());
    }
}
