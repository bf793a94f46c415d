//! LocalStorage keys and imperative accessors.
//!
//! Components that write from timer callbacks (the progress saver)
//! need direct access rather than the `use_localstorage` hook; both go
//! through the same JSON encoding so the keys stay interchangeable.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Last primary-content playback position, in seconds.
pub const KEY_POSITION: &str = "yt-played-time";
/// Last primary-content volume, 0–100.
pub const KEY_VOLUME: &str = "yt-volume";
/// Subtitle display scale factor.
pub const KEY_SUBTITLE_SCALE: &str = "subtitle-scale";
/// Barrage display preferences, one key per scalar.
pub const KEY_BARRAGE_ENABLED: &str = "barrage-enabled";
pub const KEY_BARRAGE_SIZE: &str = "barrage-size";
pub const KEY_BARRAGE_HEIGHT: &str = "barrage-height";
pub const KEY_BARRAGE_SPEED: &str = "barrage-speed";

/// Per-viewer membership flag for one wall reaction.
pub fn reacted_key(video_id: &str, kind: &str) -> String {
    format!("reacted-{video_id}-{kind}")
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

pub fn get_item<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage()?.get_item(key).ok()??;
    serde_json::from_str(&raw).ok()
}

pub fn set_item<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Ok(serialized) = serde_json::to_string(value) {
        let _ = storage.set_item(key, &serialized);
    }
}

pub fn remove_item(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
