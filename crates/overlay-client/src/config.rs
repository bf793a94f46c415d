//! Page-level configuration supplied by the embedding page.
//!
//! The hosting page defines two globals before the bundle loads:
//! `MY_VIDEO_ID` (the content identifier) and, optionally,
//! `MY_SRT_FILE` (the caption-source URL). Pages that load the bundle
//! early may populate them late, so readers retry briefly.

use wasm_bindgen::JsValue;

/// Interval between retries while the globals are still undefined.
pub const GLOBALS_RETRY_MS: u32 = 100;

/// Configuration read from the embedding page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub video_id: String,
    pub captions_url: Option<String>,
}

fn window_global(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    let s = value.as_string()?;
    (!s.is_empty()).then_some(s)
}

impl PageConfig {
    /// Reads the page globals; `None` until the content id appears.
    pub fn from_globals() -> Option<Self> {
        let video_id = window_global("MY_VIDEO_ID")?;
        Some(Self {
            video_id,
            captions_url: window_global("MY_SRT_FILE"),
        })
    }
}
