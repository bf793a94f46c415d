//! Main application component.

use std::rc::Rc;

use gloo::timers::callback::Interval;
use overlay_core::PlayerState;
use yew::prelude::*;

use crate::components::{
    BarrageOverlay, CaptionOverlay, FullscreenControls, PlayerFrame, ProgressControls,
    ReactionWall, VIDEO_WRAPPER_ID,
};
use crate::hooks::use_page_config;
use crate::player::PlayerHandle;
use crate::store::RealtimeStore;

/// Retry cadence while waiting for the page to initialize the store.
const STORE_RETRY_MS: u32 = 500;

/// Root component: waits for the page globals, then mounts the overlay.
#[function_component(App)]
pub fn app() -> Html {
    match use_page_config() {
        Some(config) => {
            let captions_url = config.captions_url.map(AttrValue::from);
            html! {
                <Overlay
                    video_id={AttrValue::from(config.video_id)}
                    captions_url={captions_url}
                />
            }
        }
        None => html! { <div class="overlay-pending"></div> },
    }
}

#[derive(Properties, PartialEq)]
struct OverlayProps {
    video_id: AttrValue,
    captions_url: Option<AttrValue>,
}

/// The overlay proper, once the content id is known.
#[function_component(Overlay)]
fn overlay(props: &OverlayProps) -> Html {
    let player = use_state(|| None::<PlayerHandle>);
    let player_for_ready = use_mut_ref(|| None::<PlayerHandle>);
    let player_ready = use_state(|| false);
    let player_state = use_state(|| None::<PlayerState>);
    let store = use_state(RealtimeStore::connect);
    let drawer_close_epoch = use_state(|| 0_u64);

    // The store SDK loads independently of this bundle; keep trying
    // until the page has exposed it.
    {
        let store = store.clone();
        use_effect_with(store.is_some(), move |&connected| {
            let poll = (!connected).then(|| {
                Interval::new(STORE_RETRY_MS, move || {
                    if let Some(found) = RealtimeStore::connect() {
                        store.set(Some(found));
                    }
                })
            });
            move || drop(poll)
        });
    }

    let on_created = {
        let player = player.clone();
        let player_for_ready = player_for_ready.clone();
        Callback::from(move |handle: PlayerHandle| {
            *player_for_ready.borrow_mut() = Some(handle.clone());
            player.set(Some(handle));
        })
    };

    let on_ready = {
        let player_for_ready = player_for_ready.clone();
        let player_ready = player_ready.clone();
        Callback::from(move |()| {
            if let Some(handle) = player_for_ready.borrow().as_ref() {
                handle.allow_fullscreen();
            }
            player_ready.set(true);
        })
    };

    let on_state_change = {
        let player_state = player_state.clone();
        Callback::from(move |state: PlayerState| {
            player_state.set(Some(state));
        })
    };

    let on_platform_exit = {
        let drawer_close_epoch = drawer_close_epoch.clone();
        Callback::from(move |()| {
            drawer_close_epoch.set(*drawer_close_epoch + 1);
        })
    };

    let store_handle: Option<Rc<RealtimeStore>> = (*store).clone();

    html! {
        <div class="overlay-app">
            <div id={VIDEO_WRAPPER_ID} class="video-wrapper">
                <PlayerFrame
                    video_id={props.video_id.clone()}
                    on_created={on_created}
                    on_ready={on_ready}
                    on_state_change={on_state_change}
                />
                <CaptionOverlay
                    player={(*player).clone()}
                    player_state={*player_state}
                    video_id={props.video_id.clone()}
                    captions_url={props.captions_url.clone()}
                />
                <BarrageOverlay
                    player={(*player).clone()}
                    video_id={props.video_id.clone()}
                    store={store_handle.clone()}
                    close_epoch={*drawer_close_epoch}
                />
                <FullscreenControls on_platform_exit={on_platform_exit} />
            </div>
            <div class="player-controls">
                <ProgressControls
                    player={(*player).clone()}
                    player_state={*player_state}
                    video_id={props.video_id.clone()}
                    player_ready={*player_ready}
                />
            </div>
            <ReactionWall
                video_id={props.video_id.clone()}
                store={store_handle}
            />
        </div>
    }
}
