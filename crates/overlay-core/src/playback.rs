//! Playback state, persisted snapshots and ad detection.

use serde::{Deserialize, Serialize};

/// The author string the platform attributes inserted ads to.
pub const AD_AUTHOR: &str = "YouTube";

/// Playback states reported by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// Maps the player's raw integer state code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// Last-known position and volume, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub position_seconds: f64,
    /// Volume in the player's 0–100 range.
    pub volume: u32,
}

/// Heuristic for "the primary content is what is actually playing".
///
/// The player surface exposes no direct ad flag we can trust alone, so
/// this combines three signals: the reported video identity, the
/// player's ad-state, and the content author. An empty author or the
/// platform's ad-attribution author both mean an ad is rolling.
pub fn is_primary_content(
    expected_video_id: &str,
    reported_video_id: &str,
    author: &str,
    ad_active: bool,
) -> bool {
    if reported_video_id != expected_video_id {
        return false;
    }
    if ad_active {
        return false;
    }
    !(author.is_empty() || author == AD_AUTHOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_content_accepted() {
        assert!(is_primary_content("abc", "abc", "Some Channel", false));
    }

    #[test]
    fn test_foreign_video_id_is_not_primary() {
        assert!(!is_primary_content("abc", "xyz", "Some Channel", false));
    }

    #[test]
    fn test_ad_state_is_not_primary() {
        assert!(!is_primary_content("abc", "abc", "Some Channel", true));
    }

    #[test]
    fn test_ad_author_is_not_primary() {
        assert!(!is_primary_content("abc", "abc", AD_AUTHOR, false));
        assert!(!is_primary_content("abc", "abc", "", false));
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(PlayerState::from_code(1), Some(PlayerState::Playing));
        assert_eq!(PlayerState::from_code(2), Some(PlayerState::Paused));
        assert_eq!(PlayerState::from_code(42), None);
        assert!(PlayerState::Playing.is_playing());
        assert!(!PlayerState::Buffering.is_playing());
    }
}
