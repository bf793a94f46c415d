//! ReactionWall component - persistent per-viewer togglable counters.
//!
//! Each wall reaction subscribes to its shared counter at render time
//! and toggles it through an atomic transaction on click. The local
//! membership flag flips only after the transaction resolves, so the
//! button never shows "active" for an unacknowledged increment.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use overlay_core::{WALL_REACTIONS, reactions::toggle_transform};
use yew::prelude::*;

use crate::storage::{self, reacted_key};
use crate::store::{CounterSubscription, RealtimeStore, reaction_path};

/// Props for the ReactionWall component.
#[derive(Properties, PartialEq)]
pub struct ReactionWallProps {
    pub video_id: AttrValue,
    #[prop_or_default]
    pub store: Option<Rc<RealtimeStore>>,
}

#[function_component(ReactionWall)]
pub fn reaction_wall(props: &ReactionWallProps) -> Html {
    // Counters and flags are written from subscription and transaction
    // callbacks, so they live in RefCells with a version state that
    // only drives re-renders.
    let counts: Rc<RefCell<HashMap<&'static str, i64>>> = use_mut_ref(HashMap::new);
    let membership: Rc<RefCell<HashMap<&'static str, bool>>> = use_mut_ref(HashMap::new);
    let render_version = use_state(|| 0_u64);
    let subscriptions = use_mut_ref(Vec::<CounterSubscription>::new);

    // Seed membership from the per-viewer flags.
    {
        let membership = membership.clone();
        let render_version = render_version.clone();
        use_effect_with(props.video_id.clone(), move |video_id| {
            {
                let mut flags = membership.borrow_mut();
                for kind in WALL_REACTIONS {
                    let reacted =
                        storage::get_item::<bool>(&reacted_key(video_id, kind.id)).unwrap_or(false);
                    flags.insert(kind.id, reacted);
                }
            }
            render_version.set(render_version.wrapping_add(1));
        });
    }

    // One live counter subscription per wall reaction.
    {
        let counts = counts.clone();
        let render_version = render_version.clone();
        let subscriptions = subscriptions.clone();
        let video_id = props.video_id.clone();
        let store = props.store.clone();

        use_effect_with(props.store.is_some(), move |_| {
            subscriptions.borrow_mut().clear();
            if let Some(store) = store {
                for kind in WALL_REACTIONS {
                    let counts = counts.clone();
                    let render_version = render_version.clone();
                    let on_change = Callback::from(move |value: i64| {
                        counts.borrow_mut().insert(kind.id, value);
                        render_version.set(render_version.wrapping_add(1));
                    });
                    match store.subscribe_counter(&reaction_path(&video_id, kind.id), on_change) {
                        Ok(subscription) => subscriptions.borrow_mut().push(subscription),
                        Err(err) => tracing::warn!(%err, kind = kind.id, "subscribe failed"),
                    }
                }
            }
            move || subscriptions.borrow_mut().clear()
        });
    }

    let on_toggle = {
        let membership = membership.clone();
        let render_version = render_version.clone();
        let video_id = props.video_id.clone();
        let store = props.store.clone();
        Callback::from(move |kind_id: &'static str| {
            let Some(store) = store.clone() else {
                return;
            };
            let key = reacted_key(&video_id, kind_id);
            let is_member = storage::get_item::<bool>(&key).unwrap_or(false);
            let path = reaction_path(&video_id, kind_id);
            let membership = membership.clone();
            let render_version = render_version.clone();

            wasm_bindgen_futures::spawn_local(async move {
                let result = store
                    .run_transaction(&path, move |current| toggle_transform(current, is_member))
                    .await;
                match result {
                    Ok(()) => {
                        if is_member {
                            storage::remove_item(&key);
                        } else {
                            storage::set_item(&key, &true);
                        }
                        membership.borrow_mut().insert(kind_id, !is_member);
                        render_version.set(render_version.wrapping_add(1));
                    }
                    // No retry and no revert: the optimistic counter
                    // display catches up from the live subscription.
                    Err(err) => tracing::warn!(%err, kind = kind_id, "reaction toggle rejected"),
                }
            });
        })
    };

    let _ = *render_version;
    let counts = counts.borrow();
    let membership = membership.borrow();

    html! {
        <div class="reaction-wall">
            { for WALL_REACTIONS.iter().map(|kind| {
                let active = membership.get(kind.id).copied().unwrap_or(false);
                let count = counts.get(kind.id).copied().unwrap_or(0);
                let on_toggle = on_toggle.clone();
                let id = kind.id;
                let onclick = Callback::from(move |event: MouseEvent| {
                    event.stop_propagation();
                    on_toggle.emit(id);
                });
                html! {
                    <button
                        class={classes!("emoji-btn", active.then_some("active"))}
                        data-type={kind.id}
                        title={kind.label}
                        onclick={onclick}
                        key={kind.id}
                    >
                        { kind.icon }
                        <span class={format!("count-{}", kind.id)}>{ count }</span>
                    </button>
                }
            }) }
        </div>
    }
}
