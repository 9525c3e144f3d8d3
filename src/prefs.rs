//! Persisted player preferences: card-back style and large card text.
//!
//! Storage belongs to the host; the engine sees a synchronous key/value
//! store and keeps typed copies of the two values it cares about.

use std::collections::HashMap;

use log::warn;

/// Key of the card-back style (1..=14).
pub const CARD_BACK_STYLE_KEY: &str = "card_back_style";
/// Key of the large-card-text flag.
pub const LARGE_CARD_TEXT_KEY: &str = "large_card_text";

/// Synchronous key/value preference storage provided by the host.
pub trait PreferenceStore {
    fn get_u32(&self, key: &str) -> Option<u32>;
    fn set_u32(&mut self, key: &str, value: u32);
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&mut self, key: &str, value: bool);
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryPrefs {
    numbers: HashMap<String, u32>,
    flags: HashMap<String, bool>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get_u32(&self, key: &str) -> Option<u32> {
        self.numbers.get(key).copied()
    }

    fn set_u32(&mut self, key: &str, value: u32) {
        self.numbers.insert(key.to_string(), value);
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
    }
}

/// One of the 14 card-back designs, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardBackStyle(u8);

impl CardBackStyle {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 14;

    pub fn new(index: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&index).then_some(CardBackStyle(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The following style, wrapping 14 back to 1.
    pub fn next(self) -> Self {
        if self.0 >= Self::MAX {
            CardBackStyle(Self::MIN)
        } else {
            CardBackStyle(self.0 + 1)
        }
    }
}

impl Default for CardBackStyle {
    fn default() -> Self {
        CardBackStyle(Self::MIN)
    }
}

/// Typed view of the stored preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    pub back_style: CardBackStyle,
    pub large_text: bool,
}

impl Preferences {
    /// Read both values, falling back to defaults. An out-of-range style is
    /// clamped into 1..=14.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let back_style = match store.get_u32(CARD_BACK_STYLE_KEY) {
            None => CardBackStyle::default(),
            Some(raw) => {
                let clamped = raw.clamp(CardBackStyle::MIN as u32, CardBackStyle::MAX as u32) as u8;
                if clamped as u32 != raw {
                    warn!("stored card-back style {raw} out of range, using {clamped}");
                }
                CardBackStyle(clamped)
            }
        };
        Preferences {
            back_style,
            large_text: store.get_bool(LARGE_CARD_TEXT_KEY).unwrap_or(false),
        }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set_u32(CARD_BACK_STYLE_KEY, self.back_style.index() as u32);
        store.set_bool(LARGE_CARD_TEXT_KEY, self.large_text);
    }
}
