use std::ops::Deref;

use yew::prelude::*;

/// State hook backed by localStorage: loaded (with fallback) on first
/// render, written through on every change.
#[hook]
pub fn use_localstorage<T, F>(key: &'static str, init_fn: F) -> UseStateHandle<T>
where
    T: 'static + Clone + serde::Serialize + serde::de::DeserializeOwned + PartialEq,
    F: Fn() -> T + 'static,
{
    let state = use_state(|| crate::storage::get_item(key).unwrap_or_else(init_fn));
    {
        let state = state.clone();
        use_effect_with(state.clone(), move |state| {
            crate::storage::set_item(key, state.deref());
            || ()
        });
    }
    state
}
