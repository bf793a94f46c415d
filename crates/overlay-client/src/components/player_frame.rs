//! PlayerFrame component - mounts the embedded player.

use overlay_core::PlayerState;
use yew::prelude::*;

use crate::player::PlayerHandle;

/// DOM id the embedded player replaces with its iframe.
pub const PLAYER_ELEMENT_ID: &str = "player";

/// Props for the PlayerFrame component.
#[derive(Properties, PartialEq)]
pub struct PlayerFrameProps {
    pub video_id: AttrValue,
    /// Fires once with the handle as soon as the player is constructed.
    pub on_created: Callback<PlayerHandle>,
    /// The player finished loading and accepts control calls.
    pub on_ready: Callback<()>,
    pub on_state_change: Callback<PlayerState>,
}

/// Mount point for the external player. Construction happens once per
/// video id; the handle is lifted to the parent so the sibling
/// overlays can poll it.
#[function_component(PlayerFrame)]
pub fn player_frame(props: &PlayerFrameProps) -> Html {
    let on_created = props.on_created.clone();
    let on_ready = props.on_ready.clone();
    let on_state_change = props.on_state_change.clone();

    use_effect_with(props.video_id.clone(), move |video_id| {
        let handle = PlayerHandle::create(
            PLAYER_ELEMENT_ID,
            video_id,
            on_ready,
            on_state_change,
        );
        on_created.emit(handle);
    });

    html! {
        <div id={PLAYER_ELEMENT_ID} class="player-frame"></div>
    }
}
