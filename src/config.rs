//! Engine configuration models.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Card and pile geometry, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Card width
    pub card_width: f32,

    /// Card height
    pub card_height: f32,

    /// Horizontal gap between pile columns
    pub gap: f32,

    /// Outer margin around the layout
    pub margin: f32,

    /// Vertical fan step for face-down tableau cards
    pub face_down_offset: f32,

    /// Vertical fan step for face-up tableau cards
    pub face_up_offset: f32,

    /// Horizontal fan step for the visible waste group
    pub waste_offset: f32,

    /// Multiplier on the face-up fan step in large-text mode
    pub large_text_factor: f32,

    /// Corner radius of empty-slot outlines
    pub corner_radius: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            card_width: 72.0,
            card_height: 100.0,
            gap: 8.0,
            margin: 8.0,
            face_down_offset: 8.0,
            face_up_offset: 22.0,
            waste_offset: 16.0,
            large_text_factor: 1.5,
            corner_radius: 6.0,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pointer travel that turns a selection into a drag (default: 12px)
    pub drag_threshold_px: f32,

    /// Longest press that still counts as a tap (default: 300ms)
    pub tap_max_ms: u64,

    /// Extra hit-test margin around drop targets (default: 24px)
    pub drop_padding_px: f32,

    /// How long hint text stays up (default: 2s)
    pub hint_duration_ms: u64,

    /// Per-card reveal delay for the draw animation (default: 80ms)
    pub draw_stagger_ms: u64,

    /// Layout geometry
    pub geometry: Geometry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: 12.0,
            tap_max_ms: 300,
            drop_padding_px: 24.0,
            hint_duration_ms: 2_000,
            draw_stagger_ms: 80,
            geometry: Geometry::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.geometry;
        positive("geometry.card_width", g.card_width)?;
        positive("geometry.card_height", g.card_height)?;
        positive("geometry.face_up_offset", g.face_up_offset)?;
        positive("geometry.large_text_factor", g.large_text_factor)?;
        non_negative("geometry.gap", g.gap)?;
        non_negative("geometry.margin", g.margin)?;
        non_negative("geometry.face_down_offset", g.face_down_offset)?;
        non_negative("geometry.waste_offset", g.waste_offset)?;
        non_negative("geometry.corner_radius", g.corner_radius)?;
        non_negative("drag_threshold_px", self.drag_threshold_px)?;
        non_negative("drop_padding_px", self.drop_padding_px)?;

        if self.tap_max_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tap_max_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.hint_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "hint_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}
