// Every tunable of the pipeline in one place, owned by main and handed
// out field-by-field to the components that need it.

use std::time::Duration;

use crate::types::Rgb;

/// Uniform background of the persistent canvas (white).
pub const BACKGROUND: u32 = 0x00FF_FFFF;

#[derive(Debug, Clone)]
pub struct Config {
    /// Camera device index (0 = default webcam). `AIR_CANVAS_CAMERA`.
    pub camera_index: u32,
    /// Requested capture width in pixels. `AIR_CANVAS_WIDTH`.
    pub frame_width: u32,
    /// Requested capture height in pixels. `AIR_CANVAS_HEIGHT`.
    pub frame_height: u32,
    /// Exponential smoothing factor applied per axis to the cursor.
    pub smoothing: f32,
    /// Pinch threshold in raw pixels: index-to-thumb distances below this
    /// read as pen-up. Pixel-space, so implicitly resolution-dependent.
    pub pinch_threshold: f32,
    /// Bounded length of each color's stroke history.
    pub history_capacity: usize,
    /// Minimum time between two accepted button activations.
    pub button_cooldown: Duration,
    /// Starting ink color.
    pub initial_color: Rgb,
    /// Starting brush thickness, within [`BRUSH_MIN`, `BRUSH_MAX`].
    pub initial_brush: u32,
    /// Minimum confidence for a hand detection to be used.
    pub min_detection_confidence: f32,
}

pub const BRUSH_MIN: u32 = 1;
pub const BRUSH_MAX: u32 = 20;

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_index: 0,
            frame_width: 1080,
            frame_height: 720,
            smoothing: 0.3,
            pinch_threshold: 40.0,
            history_capacity: 1024,
            button_cooldown: Duration::from_secs(1),
            initial_color: Rgb::new(255, 0, 0),
            initial_brush: 2,
            min_detection_confidence: 0.8,
        }
    }
}

impl Config {
    /// Defaults with the deployment-facing knobs (device, resolution)
    /// overridable from the environment. Unparsable values fall back to
    /// the default rather than erroring.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.camera_index = env_u32("AIR_CANVAS_CAMERA", cfg.camera_index);
        cfg.frame_width = env_u32("AIR_CANVAS_WIDTH", cfg.frame_width);
        cfg.frame_height = env_u32("AIR_CANVAS_HEIGHT", cfg.frame_height);
        cfg
    }
}

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_tunables() {
        let cfg = Config::default();
        assert_eq!(cfg.smoothing, 0.3);
        assert_eq!(cfg.pinch_threshold, 40.0);
        assert_eq!(cfg.history_capacity, 1024);
        assert_eq!(cfg.button_cooldown, Duration::from_secs(1));
        assert_eq!(cfg.initial_brush, 2);
        assert_eq!(cfg.initial_color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn unset_env_falls_back_to_default() {
        assert_eq!(env_u32("AIR_CANVAS_TEST_UNSET_VAR", 7), 7);
    }
}
