//! Persisted display preferences and their clamping rules.

use serde::{Deserialize, Serialize};

/// Subtitle scale bounds and step.
pub const SUBTITLE_SCALE_MIN: f64 = 0.6;
pub const SUBTITLE_SCALE_MAX: f64 = 2.0;
pub const SUBTITLE_SCALE_STEP: f64 = 0.1;

/// Clamps a subtitle scale into its allowed range.
pub fn clamp_subtitle_scale(scale: f64) -> f64 {
    scale.clamp(SUBTITLE_SCALE_MIN, SUBTITLE_SCALE_MAX)
}

/// Barrage display preferences, persisted per viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarragePrefs {
    /// Whether floating elements are rendered at all. Sends still
    /// update the shared counter when this is off.
    pub enabled: bool,
    /// Glyph size in pixels.
    pub size_px: u32,
    /// Height of the vertical band, as a percentage of the player.
    pub height_pct: u32,
    /// Scroll speed, 1 (slow) to 10 (fast).
    pub speed: u32,
}

impl Default for BarragePrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            size_px: 24,
            height_pct: 40,
            speed: 5,
        }
    }
}

impl BarragePrefs {
    /// Returns a copy with every field forced into its allowed range.
    pub fn clamped(self) -> Self {
        Self {
            enabled: self.enabled,
            size_px: self.size_px.clamp(16, 40),
            height_pct: self.height_pct.clamp(20, 100),
            speed: self.speed.clamp(1, 10),
        }
    }

    /// CSS animation duration in seconds; higher speed scrolls faster.
    pub fn scroll_duration_secs(self) -> u32 {
        13 - self.speed.clamp(1, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_scale_clamped() {
        assert_eq!(clamp_subtitle_scale(0.1), SUBTITLE_SCALE_MIN);
        assert_eq!(clamp_subtitle_scale(5.0), SUBTITLE_SCALE_MAX);
        assert_eq!(clamp_subtitle_scale(1.3), 1.3);
    }

    #[test]
    fn test_prefs_clamped() {
        let prefs = BarragePrefs { enabled: true, size_px: 200, height_pct: 5, speed: 0 };
        let clamped = prefs.clamped();
        assert_eq!(clamped.size_px, 40);
        assert_eq!(clamped.height_pct, 20);
        assert_eq!(clamped.speed, 1);
    }

    #[test]
    fn test_scroll_duration_inverts_speed() {
        assert_eq!(BarragePrefs::default().scroll_duration_secs(), 8);
        let fast = BarragePrefs { speed: 10, ..Default::default() };
        assert_eq!(fast.scroll_duration_secs(), 3);
    }
}
