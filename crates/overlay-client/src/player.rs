//! Bindings to the embedded third-party video player.
//!
//! The player is an external collaborator reached through the iframe
//! API the platform injects as the `YT` global. Every method call is
//! `catch`-wrapped: the surface may not be fully constructed yet, and
//! a missing method must degrade to a no-op, never a panic.

use std::rc::Rc;

use overlay_core::{PlayerState, is_primary_content};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use yew::Callback;

#[wasm_bindgen]
extern "C" {
    /// Raw `YT.Player` handle over the player mount element.
    #[wasm_bindgen(js_namespace = YT, js_name = Player)]
    type RawPlayer;

    #[wasm_bindgen(constructor, js_namespace = YT, js_class = "Player")]
    fn new(element_id: &str, options: &JsValue) -> RawPlayer;

    #[wasm_bindgen(method, catch, js_name = getCurrentTime)]
    fn get_current_time(this: &RawPlayer) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getVolume)]
    fn get_volume(this: &RawPlayer) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setVolume)]
    fn set_volume(this: &RawPlayer, volume: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = seekTo)]
    fn seek_to(this: &RawPlayer, seconds: f64, allow_seek_ahead: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = getPlayerState)]
    fn get_player_state(this: &RawPlayer) -> Result<i32, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getAdState)]
    fn get_ad_state(this: &RawPlayer) -> Result<i32, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getVideoData)]
    fn get_video_data(this: &RawPlayer) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getIframe)]
    fn get_iframe(this: &RawPlayer) -> Result<web_sys::Element, JsValue>;
}

/// Identity metadata the player reports for whatever is playing now.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoData {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub author: String,
}

struct Inner {
    raw: RawPlayer,
    // Kept alive for the lifetime of the player.
    _on_ready: Closure<dyn FnMut(JsValue)>,
    _on_state_change: Closure<dyn FnMut(JsValue)>,
}

/// Cloneable, defensively-guarded handle to the embedded player.
#[derive(Clone)]
pub struct PlayerHandle {
    inner: Rc<Inner>,
}

impl PartialEq for PlayerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

fn set(obj: &js_sys::Object, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
}

impl PlayerHandle {
    /// Constructs the embedded player over `element_id` with the fixed
    /// presentation flags, wiring ready/state-change notifications.
    pub fn create(
        element_id: &str,
        video_id: &str,
        on_ready: Callback<()>,
        on_state_change: Callback<PlayerState>,
    ) -> Self {
        let player_vars = js_sys::Object::new();
        for (key, value) in [
            ("start", 1),
            ("rel", 0),
            ("playsinline", 1),
            ("modestbranding", 1),
            ("fs", 0),
            ("controls", 1),
        ] {
            set(&player_vars, key, &JsValue::from_f64(f64::from(value)));
        }

        let on_ready = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            on_ready.emit(());
        });
        let on_state_change = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let code = js_sys::Reflect::get(&event, &JsValue::from_str("data"))
                .ok()
                .and_then(|v| v.as_f64());
            if let Some(state) = code.and_then(|c| PlayerState::from_code(c as i32)) {
                on_state_change.emit(state);
            }
        });

        let events = js_sys::Object::new();
        set(&events, "onReady", on_ready.as_ref());
        set(&events, "onStateChange", on_state_change.as_ref());

        let options = js_sys::Object::new();
        set(&options, "videoId", &JsValue::from_str(video_id));
        set(&options, "playerVars", &player_vars);
        set(&options, "events", &events);

        let raw = RawPlayer::new(element_id, &options);

        Self {
            inner: Rc::new(Inner {
                raw,
                _on_ready: on_ready,
                _on_state_change: on_state_change,
            }),
        }
    }

    pub fn current_time(&self) -> Option<f64> {
        self.inner.raw.get_current_time().ok()
    }

    /// Current playback position as a whole second, for barrage keys.
    pub fn current_second(&self) -> Option<i64> {
        self.current_time().map(|t| t.floor() as i64)
    }

    pub fn volume(&self) -> Option<u32> {
        self.inner.raw.get_volume().ok().map(|v| v.max(0.0) as u32)
    }

    pub fn set_volume(&self, volume: u32) {
        if self.inner.raw.set_volume(volume).is_err() {
            tracing::debug!("set_volume ignored, player surface not ready");
        }
    }

    pub fn seek_to(&self, seconds: f64) {
        let _ = self.inner.raw.seek_to(seconds, true);
    }

    pub fn state(&self) -> Option<PlayerState> {
        self.inner
            .raw
            .get_player_state()
            .ok()
            .and_then(PlayerState::from_code)
    }

    pub fn video_data(&self) -> Option<VideoData> {
        let value = self.inner.raw.get_video_data().ok()?;
        serde_wasm_bindgen::from_value(value).ok()
    }

    fn ad_active(&self) -> bool {
        // getAdState is absent on some player builds; absence means
        // "no ad signal", not an error.
        self.inner.raw.get_ad_state().map(|s| s != -1).unwrap_or(false)
    }

    /// True when the expected content, not an ad or a foreign video,
    /// is what the player is actually showing.
    pub fn is_primary(&self, expected_video_id: &str) -> bool {
        let Some(data) = self.video_data() else {
            return false;
        };
        is_primary_content(
            expected_video_id,
            &data.video_id,
            &data.author,
            self.ad_active(),
        )
    }

    /// Re-enables the fullscreen attribute the embed strips.
    pub fn allow_fullscreen(&self) {
        if let Ok(iframe) = self.inner.raw.get_iframe() {
            let _ = iframe.set_attribute("allowfullscreen", "");
        }
    }
}
