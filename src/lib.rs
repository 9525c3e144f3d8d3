pub mod card;
pub mod deal_code;
pub mod pile;
pub mod table;
pub mod moves;
pub mod search;
pub mod evaluator;
pub mod hint;
pub mod timer;
pub mod layout;
pub mod selection;
pub mod snapshot;
pub mod render;
pub mod display;
pub mod prefs;
pub mod config;
pub mod error;
pub mod stats;
pub mod game;
pub mod canonical_decks;

pub use card::{Card, Color, Rank, Suit};
pub use config::EngineConfig;
pub use deal_code::DealCode;
pub use error::{ConfigError, DealCodeError, EngineError};
pub use evaluator::GameStatus;
pub use game::{Engine, EngineBuilder, Feedback, NoFeedback};
pub use pile::PileId;
pub use render::{CardImage, RenderSurface, render};
pub use selection::{PointerEvent, PointerKind};
pub use snapshot::Snapshot;
pub use table::Table;
