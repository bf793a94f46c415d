//! FullscreenControls component - immersive-mode toggling.
//!
//! Wraps the [`PresentationMachine`] with the platform side effects:
//! native fullscreen requests with a CSS pseudo-fullscreen fallback,
//! body/wrapper class management, and the fading exit affordance that
//! reappears on pointer or touch activity over the player region.

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use overlay_core::{EnterOutcome, PresentationMachine, ToggleAction};
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// DOM id of the element taken fullscreen.
pub const VIDEO_WRAPPER_ID: &str = "video-wrapper";

/// Fade-out time of the exit affordance before it leaves layout.
const EXIT_FADE_MS: u32 = 300;

/// Settling delay after an orientation change.
const ORIENTATION_SETTLE_MS: u32 = 500;

const PSEUDO_FULLSCREEN_CLASS: &str = "pseudo-fullscreen";
const BODY_IMMERSIVE_CLASSES: [&str; 2] = ["is-in-fullscreen", "has-fullscreen"];

const LABEL_ENTER: &str = "進入全螢幕";
const LABEL_EXIT: &str = "退出全螢幕";

/// Props for the FullscreenControls component.
#[derive(Properties, PartialEq)]
pub struct FullscreenControlsProps {
    /// Fires on every platform notification that fullscreen is no
    /// longer held; the parent closes the emoji drawer on it.
    pub on_platform_exit: Callback<()>,
}

fn wrapper_el() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(VIDEO_WRAPPER_ID)
}

fn platform_fullscreen_active() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_some_and(|d| d.fullscreen_element().is_some())
}

fn restricted_platform() -> bool {
    web_sys::window()
        .map(|w| w.navigator().user_agent().unwrap_or_default())
        .is_some_and(|ua| ua.contains("iPhone") || ua.contains("iPod"))
}

fn set_immersive_chrome(immersive: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    for class in BODY_IMMERSIVE_CLASSES {
        if immersive {
            let _ = body.class_list().add_1(class);
        } else {
            let _ = body.class_list().remove_1(class);
        }
    }
}

/// Calls `requestFullscreen` keeping the promise web-sys discards;
/// the platform signals refusal by rejecting it, not by throwing.
fn request_fullscreen_promise(wrapper: &web_sys::Element) -> Option<js_sys::Promise> {
    let request = js_sys::Reflect::get(wrapper, &wasm_bindgen::JsValue::from_str("requestFullscreen"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    request.call0(wrapper).ok()?.dyn_into::<js_sys::Promise>().ok()
}

fn event_inside_wrapper(event: &web_sys::Event) -> bool {
    let Some(wrapper) = wrapper_el() else {
        return false;
    };
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| wrapper.contains(Some(&node)))
}

#[function_component(FullscreenControls)]
pub fn fullscreen_controls(props: &FullscreenControlsProps) -> Html {
    let machine = use_mut_ref(PresentationMachine::new);
    let immersive = use_state(|| false);
    // Exit affordance: opacity and layout are tracked separately so it
    // can fade before leaving layout.
    let exit_opaque = use_state(|| false);
    let exit_in_layout = use_state(|| false);
    let fade_generation = use_mut_ref(|| 0_u64);

    // Re-derives the exit affordance from the machine state.
    let refresh_exit = {
        let machine = machine.clone();
        let exit_opaque = exit_opaque.clone();
        let exit_in_layout = exit_in_layout.clone();
        let fade_generation = fade_generation.clone();
        Callback::from(move |()| {
            *fade_generation.borrow_mut() += 1;
            if machine.borrow().exit_control_visible() {
                exit_opaque.set(true);
                exit_in_layout.set(true);
            } else {
                exit_opaque.set(false);
                let generation = *fade_generation.borrow();
                let fade_generation = fade_generation.clone();
                let exit_in_layout = exit_in_layout.clone();
                Timeout::new(EXIT_FADE_MS, move || {
                    // a re-trigger during the fade keeps it in layout
                    if *fade_generation.borrow() == generation {
                        exit_in_layout.set(false);
                    }
                })
                .forget();
            }
        })
    };

    let toggle = {
        let machine = machine.clone();
        let immersive = immersive.clone();
        let refresh_exit = refresh_exit.clone();
        Callback::from(move |_: MouseEvent| {
            let action = machine.borrow_mut().toggle(restricted_platform());
            match action {
                ToggleAction::Exit { release_native } => {
                    if release_native {
                        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                            document.exit_fullscreen();
                        }
                    }
                    if let Some(wrapper) = wrapper_el() {
                        let _ = wrapper.class_list().remove_1(PSEUDO_FULLSCREEN_CLASS);
                    }
                    set_immersive_chrome(false);
                    immersive.set(false);
                    refresh_exit.emit(());
                }
                ToggleAction::Enter(outcome) => {
                    match outcome {
                        EnterOutcome::RequestNative => {
                            let fall_back = {
                                let machine = machine.clone();
                                move || {
                                    machine.borrow_mut().fallback_pseudo();
                                    if let Some(wrapper) = wrapper_el() {
                                        let _ =
                                            wrapper.class_list().add_1(PSEUDO_FULLSCREEN_CLASS);
                                    }
                                }
                            };
                            match wrapper_el().and_then(|w| request_fullscreen_promise(&w)) {
                                Some(promise) => {
                                    wasm_bindgen_futures::spawn_local(async move {
                                        if wasm_bindgen_futures::JsFuture::from(promise)
                                            .await
                                            .is_err()
                                        {
                                            fall_back();
                                        }
                                    });
                                }
                                // a synchronous throw or a missing API
                                None => fall_back(),
                            }
                        }
                        EnterOutcome::Pseudo => {
                            if let Some(wrapper) = wrapper_el() {
                                let _ = wrapper.class_list().add_1(PSEUDO_FULLSCREEN_CLASS);
                            }
                        }
                    }
                    set_immersive_chrome(true);
                    immersive.set(true);
                    if let Some(window) = web_sys::window() {
                        window.scroll_to_with_x_and_y(0.0, 0.0);
                    }
                    let refresh_exit = refresh_exit.clone();
                    Timeout::new(EXIT_FADE_MS, move || refresh_exit.emit(())).forget();
                }
            }
        })
    };

    // Platform listeners: activity over the player region re-derives
    // the exit affordance; fullscreenchange reconciles external exits.
    {
        let machine = machine.clone();
        let immersive = immersive.clone();
        let refresh_exit = refresh_exit.clone();
        let on_platform_exit = props.on_platform_exit.clone();

        use_effect_with((), move |()| {
            let window = web_sys::window().expect("no window");
            let document = window.document().expect("no document");

            let capture = EventListenerOptions {
                phase: EventListenerPhase::Capture,
                ..EventListenerOptions::default()
            };

            let mousemove = {
                let refresh_exit = refresh_exit.clone();
                EventListener::new_with_options(
                    &document,
                    "mousemove",
                    capture,
                    move |event| {
                        if event_inside_wrapper(event) {
                            refresh_exit.emit(());
                        }
                    },
                )
            };

            let touchstart = {
                let refresh_exit = refresh_exit.clone();
                EventListener::new_with_options(
                    &document,
                    "touchstart",
                    capture,
                    move |event| {
                        if event_inside_wrapper(event) {
                            refresh_exit.emit(());
                        }
                    },
                )
            };

            let orientation = {
                let refresh_exit = refresh_exit.clone();
                EventListener::new(&window, "orientationchange", move |_| {
                    let refresh_exit = refresh_exit.clone();
                    Timeout::new(ORIENTATION_SETTLE_MS, move || refresh_exit.emit(())).forget();
                })
            };

            let reconcile = Callback::from(move |()| {
                let outcome = machine
                    .borrow_mut()
                    .reconcile_platform(platform_fullscreen_active());
                if outcome.forced_exit {
                    set_immersive_chrome(false);
                    immersive.set(false);
                }
                if outcome.close_drawer {
                    on_platform_exit.emit(());
                }
                refresh_exit.emit(());
            });

            let fullscreenchange = {
                let reconcile = reconcile.clone();
                EventListener::new(&document, "fullscreenchange", move |_| {
                    reconcile.emit(());
                })
            };
            let webkit_fullscreenchange = {
                let reconcile = reconcile.clone();
                EventListener::new(&document, "webkitfullscreenchange", move |_| {
                    reconcile.emit(());
                })
            };

            move || {
                drop(mousemove);
                drop(touchstart);
                drop(orientation);
                drop(fullscreenchange);
                drop(webkit_fullscreenchange);
            }
        });
    }

    let exit_click = {
        let toggle = toggle.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            toggle.emit(event);
        })
    };

    let exit_style = format!(
        "display: {}; opacity: {};",
        if *exit_in_layout { "flex" } else { "none" },
        if *exit_opaque { "1" } else { "0" },
    );

    html! {
        <>
            <button id="fs-btn" class="fs-toggle-btn" onclick={toggle}>
                { if *immersive { LABEL_EXIT } else { LABEL_ENTER } }
            </button>
            <button id="exit-fs-btn" class="exit-fs-btn" style={exit_style} onclick={exit_click}>
                { LABEL_EXIT }
            </button>
        </>
    }
}
