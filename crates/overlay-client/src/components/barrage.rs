//! BarrageOverlay component - floating emoji layer plus emoji drawer.
//!
//! Local sends echo immediately and increment the shared per-second
//! counter; a 500ms poll fans in everyone else's sends for the current
//! playback second, minus our own already-echoed contribution.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use overlay_core::barrage::{RELEASE_JITTER_MS, bump_transform};
use overlay_core::{
    BARRAGE_REACTIONS, BarragePrefs, BarrageSignal, FloatingPool, PlayerState, SecondTracker,
    SendGate, glyph_for, plan_emissions, vertical_offset,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::hooks::use_localstorage;
use crate::player::PlayerHandle;
use crate::storage::{
    KEY_BARRAGE_ENABLED, KEY_BARRAGE_HEIGHT, KEY_BARRAGE_SIZE, KEY_BARRAGE_SPEED,
};
use crate::store::{RealtimeStore, barrage_path, barrage_second_path};

/// Remote fan-in poll cadence.
const FANIN_INTERVAL_MS: u32 = 500;

/// One floating element currently animating across the band.
#[derive(Clone)]
struct FloatingEmoji {
    id: u64,
    glyph: String,
    top_px: f64,
}

/// Props for the BarrageOverlay component.
#[derive(Properties, PartialEq)]
pub struct BarrageOverlayProps {
    pub player: Option<PlayerHandle>,
    pub video_id: AttrValue,
    #[prop_or_default]
    pub store: Option<Rc<RealtimeStore>>,
    /// Bumped by the parent to force-close the drawer (platform
    /// fullscreen exit).
    #[prop_or_default]
    pub close_epoch: u64,
}

#[function_component(BarrageOverlay)]
pub fn barrage_overlay(props: &BarrageOverlayProps) -> Html {
    // Persisted display preferences, one storage key per scalar.
    let enabled = use_localstorage(KEY_BARRAGE_ENABLED, || true);
    let size_px = use_localstorage(KEY_BARRAGE_SIZE, || BarragePrefs::default().size_px);
    let height_pct = use_localstorage(KEY_BARRAGE_HEIGHT, || BarragePrefs::default().height_pct);
    let speed = use_localstorage(KEY_BARRAGE_SPEED, || BarragePrefs::default().speed);
    let prefs = BarragePrefs {
        enabled: *enabled,
        size_px: *size_px,
        height_pct: *height_pct,
        speed: *speed,
    }
    .clamped();

    let drawer_open = use_state(|| false);
    let drawer_ref = use_node_ref();
    let trigger_ref = use_node_ref();
    let container_ref = use_node_ref();

    // Floating elements live in a RefCell, mutated from timers; the
    // version state only triggers re-renders.
    let floats: Rc<RefCell<Vec<FloatingEmoji>>> = use_mut_ref(Vec::new);
    let pool = use_mut_ref(FloatingPool::default);
    let next_id = use_mut_ref(|| 0_u64);
    let render_version = use_state(|| 0_u64);

    let send_gate = use_mut_ref(SendGate::new);
    let last_sent: Rc<RefCell<Option<BarrageSignal>>> = use_mut_ref(|| None);
    let second_tracker = use_mut_ref(SecondTracker::new);

    // Timer callbacks must see the current prefs, not the ones from
    // the render that created the timer.
    let prefs_ref = use_mut_ref(BarragePrefs::default);
    *prefs_ref.borrow_mut() = prefs;

    let spawn_float = {
        let floats = floats.clone();
        let pool = pool.clone();
        let next_id = next_id.clone();
        let render_version = render_version.clone();
        let prefs_ref = prefs_ref.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |glyph: String| {
            let prefs = *prefs_ref.borrow();
            if !prefs.enabled {
                return;
            }
            let id = {
                let mut counter = next_id.borrow_mut();
                *counter += 1;
                *counter
            };
            if let Some(evicted) = pool.borrow_mut().insert(id) {
                floats.borrow_mut().retain(|f| f.id != evicted);
            }
            let container_height = container_ref
                .cast::<web_sys::HtmlElement>()
                .map_or(100.0, |el| f64::from(el.offset_height()));
            // the glyph box tracks the configured font size
            let top_px = vertical_offset(
                container_height,
                f64::from(prefs.size_px),
                rand::random::<f64>(),
            );
            floats.borrow_mut().push(FloatingEmoji {
                id,
                glyph,
                top_px,
            });
            render_version.set(id);
        })
    };

    let remove_float = {
        let floats = floats.clone();
        let pool = pool.clone();
        let render_version = render_version.clone();
        Callback::from(move |id: u64| {
            floats.borrow_mut().retain(|f| f.id != id);
            pool.borrow_mut().remove(id);
            render_version.set(u64::MAX - id);
        })
    };

    // Local send: debounce, optimistic echo, shared-counter increment.
    let send = {
        let send_gate = send_gate.clone();
        let last_sent = last_sent.clone();
        let spawn_float = spawn_float.clone();
        let drawer_open = drawer_open.clone();
        let player = props.player.clone();
        let store = props.store.clone();
        let video_id = props.video_id.clone();
        Callback::from(move |kind: String| {
            if !send_gate.borrow_mut().try_accept(js_sys::Date::now()) {
                return;
            }
            if let Some(glyph) = glyph_for(&kind) {
                spawn_float.emit(glyph.to_string());
            }
            // No player time means no remote record; the echo stands
            // alone.
            if let (Some(player), Some(store)) = (player.as_ref(), store.as_ref()) {
                if let Some(second) = player.current_second() {
                    *last_sent.borrow_mut() = Some(BarrageSignal {
                        second,
                        kind: kind.clone(),
                    });
                    let store = store.clone();
                    let path = barrage_path(&video_id, second, &kind);
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(err) = store.run_transaction(&path, bump_transform).await {
                            tracing::warn!(%err, "barrage increment rejected");
                        }
                    });
                }
            }
            drawer_open.set(false);
        })
    };

    // Remote fan-in: at most one read per distinct playback second.
    {
        let second_tracker = second_tracker.clone();
        let last_sent = last_sent.clone();
        let spawn_float = spawn_float.clone();
        let player = props.player.clone();
        let store = props.store.clone();
        let video_id = props.video_id.to_string();

        use_effect_with(
            (props.player.clone(), props.store.is_some()),
            move |_| {
                let interval = match (player, store) {
                    (Some(player), Some(store)) => {
                        Some(Interval::new(FANIN_INTERVAL_MS, move || {
                            if player.state() != Some(PlayerState::Playing) {
                                return;
                            }
                            let Some(second) = player.current_second() else {
                                return;
                            };
                            if !second_tracker.borrow_mut().advance(second) {
                                return;
                            }
                            let store = store.clone();
                            let path = barrage_second_path(&video_id, second);
                            let last_sent = last_sent.clone();
                            let spawn_float = spawn_float.clone();
                            wasm_bindgen_futures::spawn_local(async move {
                                let counts = match store.read_counts_once(&path).await {
                                    Ok(counts) => counts,
                                    Err(err) => {
                                        tracing::warn!(%err, "barrage fan-in read failed");
                                        return;
                                    }
                                };
                                let plan =
                                    plan_emissions(second, &counts, last_sent.borrow().as_ref());
                                for emission in plan {
                                    let Some(glyph) = glyph_for(&emission.kind) else {
                                        continue;
                                    };
                                    for _ in 0..emission.count {
                                        let spawn_float = spawn_float.clone();
                                        let glyph = glyph.to_string();
                                        let jitter =
                                            (rand::random::<f64>() * RELEASE_JITTER_MS) as u32;
                                        Timeout::new(jitter, move || {
                                            spawn_float.emit(glyph);
                                        })
                                        .forget();
                                    }
                                }
                            });
                        }))
                    }
                    _ => None,
                };
                move || drop(interval)
            },
        );
    }

    // Drawer force-close: Escape, outside click, parent epoch.
    {
        let drawer_open = drawer_open.clone();
        use_effect_with(props.close_epoch, move |_| {
            drawer_open.set(false);
        });
    }
    {
        let drawer_open_handle = drawer_open.clone();
        let drawer_ref = drawer_ref.clone();
        let trigger_ref = trigger_ref.clone();
        use_effect_with(*drawer_open, move |&open| {
            let listeners = open.then(|| {
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .expect("no document");
                let escape = {
                    let drawer_open = drawer_open_handle.clone();
                    EventListener::new(&document, "keydown", move |event| {
                        if let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                            if key_event.key() == "Escape" {
                                drawer_open.set(false);
                            }
                        }
                    })
                };
                let outside_click = {
                    let drawer_open = drawer_open_handle.clone();
                    let drawer_ref = drawer_ref.clone();
                    let trigger_ref = trigger_ref.clone();
                    EventListener::new(&document, "click", move |event| {
                        let target = event.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                        let inside = |node_ref: &NodeRef| {
                            node_ref
                                .cast::<web_sys::Element>()
                                .is_some_and(|el| el.contains(target.as_ref()))
                        };
                        if !inside(&drawer_ref) && !inside(&trigger_ref) {
                            drawer_open.set(false);
                        }
                    })
                };
                (escape, outside_click)
            });
            move || drop(listeners)
        });
    }

    let toggle_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            drawer_open.set(!*drawer_open);
        })
    };

    let toggle_enabled = {
        let enabled = enabled.clone();
        Callback::from(move |_| enabled.set(!*enabled))
    };

    let range_setter = |state: UseStateHandle<u32>| {
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                if let Ok(value) = input.value().parse::<u32>() {
                    state.set(value);
                }
            }
        })
    };
    let set_size = range_setter(size_px.clone());
    let set_height = range_setter(height_pct.clone());
    let set_speed = range_setter(speed.clone());

    // version is only read to subscribe this render to float changes
    let _ = *render_version;

    let container_style = format!(
        "--barrage-size: {}px; --barrage-height: {}%; --barrage-speed: {}s;",
        prefs.size_px,
        prefs.height_pct,
        prefs.scroll_duration_secs(),
    );
    let container_class = classes!(
        "barrage-container",
        (!prefs.enabled).then_some("hide-barrage")
    );
    let visible = floats.borrow().clone();

    html! {
        <>
            <div
                id="barrage-container"
                class={container_class}
                style={container_style}
                ref={container_ref}
            >
                { for visible.iter().map(|emoji| {
                    let on_done = {
                        let remove_float = remove_float.clone();
                        let id = emoji.id;
                        Callback::from(move |_: AnimationEvent| remove_float.emit(id))
                    };
                    html! {
                        <div
                            class="barrage-item"
                            style={format!("top: {}px;", emoji.top_px)}
                            key={emoji.id.to_string()}
                            onanimationend={on_done}
                        >
                            { emoji.glyph.clone() }
                        </div>
                    }
                }) }
            </div>

            <button
                id="barrage-trigger"
                class="barrage-trigger-btn"
                ref={trigger_ref}
                onclick={toggle_drawer}
            >
                { "即時表情" }
            </button>

            <div
                id="emoji-drawer"
                class={classes!("emoji-drawer", (*drawer_open).then_some("open"))}
                ref={drawer_ref}
            >
                { for BARRAGE_REACTIONS.iter().map(|kind| {
                    let send = send.clone();
                    let id = kind.id.to_string();
                    let onclick = Callback::from(move |event: MouseEvent| {
                        event.stop_propagation();
                        send.emit(id.clone());
                    });
                    html! {
                        <button
                            class="emoji-btn"
                            title={kind.label}
                            onclick={onclick}
                            key={kind.id}
                        >
                            { kind.icon }
                        </button>
                    }
                }) }

                <div class="barrage-settings">
                    <button class="barrage-toggle-btn" onclick={toggle_enabled}>
                        { if prefs.enabled { "即時表情：開" } else { "即時表情：關" } }
                    </button>
                    if prefs.enabled {
                        <label class="barrage-control">
                            { "大小" }
                            <input type="range" min="16" max="40"
                                value={prefs.size_px.to_string()} oninput={set_size} />
                        </label>
                        <label class="barrage-control">
                            { "高度" }
                            <input type="range" min="20" max="100"
                                value={prefs.height_pct.to_string()} oninput={set_height} />
                        </label>
                        <label class="barrage-control">
                            { "速度" }
                            <input type="range" min="1" max="10"
                                value={prefs.speed.to_string()} oninput={set_speed} />
                        </label>
                    }
                </div>
            </div>
        </>
    }
}
