//! Tunable fan geometry and timing.
//!
//! Everything here is presentation tuning, not contract: changing a value
//! must never break the fan's symmetry or the window clamp.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    /// Vertical curvature of the fan, in layout units.
    pub max_arc_height: f32,
    /// Rotation of the outermost cards, in degrees.
    pub max_rotation: f32,
    /// Portion of the viewport width the fan spans.
    pub fan_width_fraction: f32,
    /// Extra lift applied to a selected card.
    pub selected_raise: f32,

    // === Windowing ===
    pub min_visible: usize,
    pub max_visible: usize,
    /// Card width as a fraction of viewport width on touch platforms.
    pub touch_card_width_fraction: f32,
    /// Card width as a fraction of viewport width on desktop platforms.
    pub desktop_card_width_fraction: f32,
    pub max_desktop_card_width: f32,
    /// Distance between neighbouring cards, as a fraction of card width.
    pub card_step_fraction: f32,

    // === Timing (ms) ===
    pub reshuffle_delay_ms: u64,
    pub select_duration_ms: u64,
    pub flip_duration_ms: u64,
    pub reset_duration_ms: u64,
    pub snap_duration_ms: u64,

    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            max_arc_height: 150.0,
            max_rotation: 30.0,
            fan_width_fraction: 0.9,
            selected_raise: 50.0,

            min_visible: 5,
            max_visible: 13,
            touch_card_width_fraction: 0.2,
            desktop_card_width_fraction: 0.1,
            max_desktop_card_width: 120.0,
            card_step_fraction: 0.5,

            reshuffle_delay_ms: 1000,
            select_duration_ms: 300,
            flip_duration_ms: 300,
            reset_duration_ms: 300,
            snap_duration_ms: 200,

            seed: None,
        }
    }
}

fn unit_fraction(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v.min(1.0)
    } else {
        fallback
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

impl FanConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: FanConfig = serde_json::from_str(s)?;
        Ok(cfg.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Copy with every value pulled back into its legal range.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let min_visible = self.min_visible.max(1);
        Self {
            max_arc_height: non_negative(self.max_arc_height),
            max_rotation: non_negative(self.max_rotation),
            fan_width_fraction: unit_fraction(self.fan_width_fraction, d.fan_width_fraction),
            selected_raise: non_negative(self.selected_raise),
            min_visible,
            max_visible: self.max_visible.max(min_visible),
            touch_card_width_fraction: unit_fraction(
                self.touch_card_width_fraction,
                d.touch_card_width_fraction,
            ),
            desktop_card_width_fraction: unit_fraction(
                self.desktop_card_width_fraction,
                d.desktop_card_width_fraction,
            ),
            max_desktop_card_width: non_negative(self.max_desktop_card_width),
            card_step_fraction: unit_fraction(self.card_step_fraction, d.card_step_fraction),
            ..self.clone()
        }
    }

    pub fn reshuffle_delay(&self) -> Duration {
        Duration::from_millis(self.reshuffle_delay_ms)
    }

    pub fn select_duration(&self) -> Duration {
        Duration::from_millis(self.select_duration_ms)
    }

    pub fn flip_duration(&self) -> Duration {
        Duration::from_millis(self.flip_duration_ms)
    }

    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_duration_ms)
    }

    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = FanConfig::from_json_str(r#"{ "max_rotation": 20.0, "seed": 9 }"#).unwrap();
        assert_eq!(cfg.max_rotation, 20.0);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.max_arc_height, 150.0);
        assert_eq!(cfg.reshuffle_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn sanitize_clamps_bad_values() {
        let cfg = FanConfig {
            fan_width_fraction: 3.0,
            max_arc_height: -10.0,
            min_visible: 0,
            max_visible: 0,
            card_step_fraction: f32::NAN,
            ..FanConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.fan_width_fraction, 1.0);
        assert_eq!(cfg.max_arc_height, 0.0);
        assert_eq!(cfg.min_visible, 1);
        assert_eq!(cfg.max_visible, 1);
        assert_eq!(cfg.card_step_fraction, 0.5);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = FanConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FanConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
