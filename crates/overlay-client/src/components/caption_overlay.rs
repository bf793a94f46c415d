//! CaptionOverlay component - synced subtitle captions.
//!
//! Fetches the caption file once, then polls the player every 200ms
//! and writes the captions whose interval contains the current time.
//! Output is suppressed whenever the player is not showing the primary
//! content (ads, foreign videos).

use std::cell::RefCell;
use std::rc::Rc;

use gloo::net::http::Request;
use gloo::timers::callback::Interval;
use overlay_core::settings::{SUBTITLE_SCALE_STEP, clamp_subtitle_scale};
use overlay_core::{Caption, PlayerState, joined_text, parse_srt};
use yew::prelude::*;

use crate::hooks::use_localstorage;
use crate::player::PlayerHandle;
use crate::storage::KEY_SUBTITLE_SCALE;

/// Poll cadence for caption selection.
const SYNC_INTERVAL_MS: u32 = 200;

/// Shown in the caption surface when the caption file cannot load.
const LOAD_FAILURE_TEXT: &str = "字幕載入失敗";

/// Props for the CaptionOverlay component.
#[derive(Properties, PartialEq)]
pub struct CaptionOverlayProps {
    pub player: Option<PlayerHandle>,
    pub player_state: Option<PlayerState>,
    pub video_id: AttrValue,
    pub captions_url: Option<AttrValue>,
}

#[function_component(CaptionOverlay)]
pub fn caption_overlay(props: &CaptionOverlayProps) -> Html {
    // Captions live in a RefCell so the poll timer sees them as soon
    // as the fetch lands, without restarting the timer.
    let captions: Rc<RefCell<Vec<Caption>>> = use_mut_ref(Vec::new);
    let display = use_state(String::new);
    let scale = use_localstorage(KEY_SUBTITLE_SCALE, || 1.0_f64);
    let sync_timer = use_mut_ref(|| None::<Interval>);

    // One-shot caption fetch.
    {
        let captions = captions.clone();
        let display = display.clone();
        use_effect_with(props.captions_url.clone(), move |url| {
            let Some(url) = url.clone() else {
                return;
            };
            wasm_bindgen_futures::spawn_local(async move {
                match Request::get(&url).send().await {
                    Ok(response) if response.ok() => match response.text().await {
                        Ok(text) => {
                            let parsed = parse_srt(&text);
                            tracing::info!(count = parsed.len(), "captions loaded");
                            *captions.borrow_mut() = parsed;
                            display.set(String::new());
                        }
                        Err(err) => {
                            tracing::warn!(%err, "caption body unreadable");
                            display.set(LOAD_FAILURE_TEXT.to_string());
                        }
                    },
                    Ok(response) => {
                        tracing::warn!(status = response.status(), "caption fetch failed");
                        display.set(LOAD_FAILURE_TEXT.to_string());
                    }
                    Err(err) => {
                        tracing::warn!(%err, "caption fetch failed");
                        display.set(LOAD_FAILURE_TEXT.to_string());
                    }
                }
            });
        });
    }

    // The sync loop starts the first time primary playback begins and
    // is never restarted afterwards.
    {
        let captions = captions.clone();
        let display = display.clone();
        let sync_timer = sync_timer.clone();
        let player = props.player.clone();
        let video_id = props.video_id.clone();
        let playing = props.player_state.is_some_and(PlayerState::is_playing);

        use_effect_with((playing, player), move |(playing, player)| {
            if *playing && sync_timer.borrow().is_none() {
                if let Some(player) = player.clone() {
                    let last_text = RefCell::new(String::new());
                    let timer = Interval::new(SYNC_INTERVAL_MS, move || {
                        let text = if player.is_primary(&video_id) {
                            player
                                .current_time()
                                .map(|t| joined_text(&captions.borrow(), t))
                                .unwrap_or_default()
                        } else {
                            String::new()
                        };
                        if *last_text.borrow() != text {
                            *last_text.borrow_mut() = text.clone();
                            display.set(text);
                        }
                    });
                    *sync_timer.borrow_mut() = Some(timer);
                }
            }
            || ()
        });
    }

    let smaller = {
        let scale = scale.clone();
        Callback::from(move |_| scale.set(clamp_subtitle_scale(*scale - SUBTITLE_SCALE_STEP)))
    };
    let larger = {
        let scale = scale.clone();
        Callback::from(move |_| scale.set(clamp_subtitle_scale(*scale + SUBTITLE_SCALE_STEP)))
    };

    let lines: Vec<&str> = display.split('\n').filter(|l| !l.is_empty()).collect();

    html! {
        <>
            <div
                id="subtitle"
                class="subtitle-surface"
                style={format!("--subtitle-scale: {}", *scale)}
            >
                { for lines.iter().map(|line| html! {
                    <div class="subtitle-line">{ *line }</div>
                }) }
            </div>
            <div class="subtitle-controls">
                <button class="subtitle-size-btn" onclick={smaller}>{ "字幕縮小" }</button>
                <button class="subtitle-size-btn" onclick={larger}>{ "字幕放大" }</button>
            </div>
        </>
    }
}
