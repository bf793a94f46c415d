//! ProgressControls component - persisted playback position/volume.

use gloo::timers::callback::{Interval, Timeout};
use overlay_core::{PlaybackSnapshot, PlayerState};
use yew::prelude::*;

use crate::player::PlayerHandle;
use crate::storage::{self, KEY_POSITION, KEY_VOLUME};

/// Autosave cadence while primary content plays.
const SAVE_INTERVAL_MS: u32 = 5_000;

/// Delay before applying the restored volume, so it lands after the
/// player's own startup volume handling.
const VOLUME_RESTORE_DELAY_MS: u32 = 500;

/// Props for the ProgressControls component.
#[derive(Properties, PartialEq)]
pub struct ProgressControlsProps {
    pub player: Option<PlayerHandle>,
    pub player_state: Option<PlayerState>,
    pub video_id: AttrValue,
    /// True once the player reported ready.
    pub player_ready: bool,
}

/// Saves position/volume on a slow poll while the primary content is
/// playing, restores them when the player becomes ready, and offers a
/// reset that clears the stored position and reloads the page.
#[function_component(ProgressControls)]
pub fn progress_controls(props: &ProgressControlsProps) -> Html {
    let save_timer = use_mut_ref(|| None::<Interval>);

    // Startup restore.
    {
        let player = props.player.clone();
        use_effect_with(props.player_ready, move |&ready| {
            if ready {
                if let Some(player) = player {
                    if let Some(position) = storage::get_item::<f64>(KEY_POSITION) {
                        player.seek_to(position);
                    }
                    if let Some(volume) = storage::get_item::<u32>(KEY_VOLUME) {
                        Timeout::new(VOLUME_RESTORE_DELAY_MS, move || {
                            player.set_volume(volume);
                        })
                        .forget();
                    }
                }
            }
        });
    }

    // Autosave poll, restarted on every transition into "playing" and
    // cancelled on any other state.
    {
        let save_timer = save_timer.clone();
        let player = props.player.clone();
        let video_id = props.video_id.clone();
        let playing = props.player_state.is_some_and(PlayerState::is_playing);

        use_effect_with((playing, player), move |(playing, player)| {
            // replacing the handle drops (and cancels) the previous one
            *save_timer.borrow_mut() = match (*playing, player.clone()) {
                (true, Some(player)) => Some(Interval::new(SAVE_INTERVAL_MS, move || {
                    if !player.is_primary(&video_id) {
                        return;
                    }
                    if let (Some(position), Some(volume)) =
                        (player.current_time(), player.volume())
                    {
                        let snapshot = PlaybackSnapshot {
                            position_seconds: position,
                            volume,
                        };
                        storage::set_item(KEY_POSITION, &snapshot.position_seconds);
                        storage::set_item(KEY_VOLUME, &snapshot.volume);
                    }
                })),
                _ => None,
            };
            || ()
        });
    }

    let reset = Callback::from(|_| {
        storage::remove_item(KEY_POSITION);
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });

    html! {
        <button class="reset-progress-btn" onclick={reset}>{ "從頭播放" }</button>
    }
}
