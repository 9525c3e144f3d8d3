//! End-to-end rule scenarios through the public API.

use std::cell::Cell;
use std::rc::Rc;

use klondike_engine::canonical_decks::canonical_unplayable_deck;
use klondike_engine::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS};
use klondike_engine::table::StockAction;
use klondike_engine::timer::ManualClock;
use klondike_engine::{Card, Engine, Feedback, PileId, Rank, Suit, Table};

fn up(suit: Suit, rank: Rank) -> Card {
    Card::face_up(suit, rank)
}

fn down(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

fn engine() -> Engine {
    Engine::builder()
        .seed(11)
        .clock(ManualClock::new(0))
        .build()
        .expect("default config is valid")
}

#[derive(Clone, Default)]
struct Signals {
    won: Rc<Cell<u32>>,
    stuck: Rc<Cell<u32>>,
}

impl Feedback for Signals {
    fn on_won(&mut self) {
        self.won.set(self.won.get() + 1);
    }

    fn on_stuck(&mut self) {
        self.stuck.set(self.stuck.get() + 1);
    }
}

#[test]
fn scenario_a_fresh_deal_shape() {
    let e = engine();
    let table = e.table();
    assert_eq!(table.tableaus()[6].len(), 7);
    let face_up: Vec<bool> = table.tableaus()[6].cards().iter().map(|c| c.face_up).collect();
    assert_eq!(face_up, [false, false, false, false, false, false, true]);
    assert_eq!(table.stock().len(), 24);
    assert!(table.waste().is_empty());
    assert!(table.foundations().iter().all(|f| f.is_empty()));
    assert_eq!(table.check_invariants(), Ok(()));
    assert!(!e.is_won());
    assert!(!e.is_stuck());
}

#[test]
fn scenario_b_foundation_building() {
    let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
    t[0] = vec![up(Suit::Spade, Rank::Ace)];
    t[1] = vec![up(Suit::Spade, Rank::Two)];
    t[2] = vec![up(Suit::Heart, Rank::Two)];
    let mut table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), t);

    assert!(table.transfer(PileId::Tableau(0), 0, PileId::Foundation(0)).is_some());
    assert!(table.transfer(PileId::Tableau(1), 0, PileId::Foundation(0)).is_some());
    assert!(table.transfer(PileId::Tableau(2), 0, PileId::Foundation(0)).is_none());

    assert_eq!(table.foundations()[0].len(), 2);
    assert_eq!(table.tableaus()[2].top(), Some(up(Suit::Heart, Rank::Two)));
}

#[test]
fn scenario_c_tableau_building() {
    let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
    t[0] = vec![down(Suit::Club, Rank::Five), up(Suit::Diamond, Rank::King)];
    t[2] = vec![up(Suit::Spade, Rank::Queen)];
    t[3] = vec![up(Suit::Spade, Rank::Jack)];
    let mut table = Table::from_parts(Vec::new(), Vec::new(), Default::default(), t);

    assert!(table.transfer(PileId::Tableau(0), 1, PileId::Tableau(1)).is_some());
    assert!(table.transfer(PileId::Tableau(2), 0, PileId::Tableau(1)).is_some());
    assert!(table.transfer(PileId::Tableau(3), 0, PileId::Tableau(1)).is_none());

    assert_eq!(table.tableaus()[1].len(), 2);
    assert_eq!(table.tableaus()[3].len(), 1);
    // The king's old column turned its hidden card up.
    assert!(table.tableaus()[0].top().is_some_and(|c| c.face_up));
}

#[test]
fn scenario_d_draw_then_recycle_two_cards() {
    let mut table = Table::from_parts(
        vec![down(Suit::Club, Rank::Ten), down(Suit::Diamond, Rank::Three)],
        Vec::new(),
        Default::default(),
        Default::default(),
    );

    assert_eq!(table.stock_click(), StockAction::Drew(2));
    assert!(table.stock().is_empty());
    assert_eq!(table.waste_group().len(), 2);
    assert!(table.waste().cards().iter().all(|c| c.face_up));

    assert_eq!(table.stock_click(), StockAction::Recycled(2));
    assert!(table.waste().is_empty());
    assert_eq!(table.stock().len(), 2);
    assert!(table.stock().cards().iter().all(|c| !c.face_up));
}

#[test]
fn scenario_e_full_foundations_win() {
    let signals = Signals::default();
    let mut e = Engine::builder()
        .clock(ManualClock::new(0))
        .feedback(signals.clone())
        .build()
        .unwrap();

    let mut foundations: [Vec<Card>; NUM_FOUNDATIONS] = std::array::from_fn(|i| {
        Rank::ALL.iter().map(|&r| up(Suit::ALL[i], r)).collect()
    });
    let king = foundations[3].pop().expect("spades are full");
    let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
    t[4] = vec![king];
    e.load_table(Table::from_parts(Vec::new(), Vec::new(), foundations, t));
    assert!(!e.is_won());

    let placed = e.tap(PileId::Tableau(4), 0).expect("the king goes home");
    assert_eq!(placed.to, PileId::Foundation(3));
    assert!(e.table().is_won());
    assert!(e.is_won());
    assert_eq!(e.status_text(), "You won!");
    assert_eq!(signals.won.get(), 1);
    assert_eq!(e.stats().games_won, 1);
}

#[test]
fn scenario_f_no_moves_is_stuck_and_stays_stuck() {
    let signals = Signals::default();
    let mut e = Engine::builder()
        .clock(ManualClock::new(0))
        .feedback(signals.clone())
        .build()
        .unwrap();

    let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
    t[0] = vec![down(Suit::Heart, Rank::Ace), up(Suit::Spade, Rank::Nine)];
    t[1] = vec![up(Suit::Club, Rank::Nine)];
    t[2] = vec![up(Suit::Diamond, Rank::Four)];
    e.load_table(Table::from_parts(Vec::new(), Vec::new(), Default::default(), t));

    assert!(e.is_stuck());
    assert!(e.is_stuck());
    assert_eq!(e.status_text(), "No moves left");

    // Queries and refused input change nothing.
    let _ = e.snapshot();
    assert!(e.tap(PileId::Tableau(1), 0).is_none());
    assert!(e.is_stuck());
    assert_eq!(signals.stuck.get(), 1);
}

#[test]
fn unplayable_deal_is_stuck_after_a_full_stock_pass() {
    let mut e = engine();
    e.new_game_with_deck(canonical_unplayable_deck());
    for _ in 0..7 {
        e.click_stock();
        assert!(!e.is_stuck());
    }
    e.click_stock();
    assert!(e.is_stuck());
}

#[test]
fn seeded_engines_deal_identically() {
    let mut a = engine();
    let mut b = engine();
    assert_eq!(a.table(), b.table());
    a.new_game();
    b.new_game();
    assert_eq!(a.table(), b.table());
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.deal_code(), b.deal_code());
}

#[test]
fn deal_code_reproduces_the_deal() {
    let a = engine();
    let code = a.deal_code().expect("dealt from a deck").to_string();
    let b = Engine::builder()
        .deal_code(code)
        .clock(ManualClock::new(0))
        .build()
        .unwrap();
    assert_eq!(a.table(), b.table());
    assert!(Engine::builder().deal_code("12abc").build().is_err());
}

#[test]
fn new_game_counts_an_abandoned_game_as_played() {
    let mut e = engine();
    e.new_game();
    e.new_game();
    let stats = e.stats();
    assert_eq!(stats.games_played, 3);
    assert_eq!(stats.games_unfinished(), 3);
}

#[test]
fn playing_a_waste_card_restarts_the_stock_pass() {
    let mut e = engine();
    let mut t: [Vec<Card>; NUM_TABLEAUS] = Default::default();
    t[0] = vec![up(Suit::Spade, Rank::Nine)];
    // Drawn from the top: 10C 9D AH, then 7C 5C JC.
    let stock = vec![
        down(Suit::Club, Rank::Jack),
        down(Suit::Club, Rank::Five),
        down(Suit::Club, Rank::Seven),
        down(Suit::Heart, Rank::Ace),
        down(Suit::Diamond, Rank::Nine),
        down(Suit::Club, Rank::Ten),
    ];
    e.load_table(Table::from_parts(stock, Vec::new(), Default::default(), t));

    assert_eq!(e.click_stock(), StockAction::Drew(3));
    let placed = e.tap(PileId::Waste, 2).expect("the ace goes home");
    assert_eq!(placed.to, PileId::Foundation(0));
    assert!(!e.is_stuck());

    // Six cards have now been drawn since the deal, but only three since
    // the ace was played: the pass is not over.
    assert_eq!(e.click_stock(), StockAction::Drew(3));
    assert!(!e.is_stuck());
    assert_eq!(e.click_stock(), StockAction::Recycled(5));
    assert!(!e.is_stuck());
    assert_eq!(e.click_stock(), StockAction::Drew(3));
    assert!(!e.is_stuck());

    assert_eq!(e.click_stock(), StockAction::Drew(2));
    assert!(e.is_stuck());
}
