//! Bindings to the shared realtime key-value store.
//!
//! The embedding page initializes the store SDK and hangs the handle
//! plus three helpers off `window`: `db`, `fb_ref`, `fb_onValue` and
//! `fb_runTransaction`. Everything here is looked up dynamically and
//! guarded, because the SDK loads independently of this bundle; a
//! missing store degrades every caller to a no-op.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use yew::Callback;

/// Store root for persistent wall-reaction counters.
const REACTIONS_ROOT: &str = "video_reactions";
/// Store root for ephemeral per-second barrage counters.
const BARRAGES_ROOT: &str = "barrages";

/// Path of one wall-reaction counter.
pub fn reaction_path(video_id: &str, kind: &str) -> String {
    format!("{REACTIONS_ROOT}/{video_id}/{kind}")
}

/// Path of one second's barrage aggregate (all types).
pub fn barrage_second_path(video_id: &str, second: i64) -> String {
    format!("{BARRAGES_ROOT}/{video_id}/{second}")
}

/// Path of one barrage counter.
pub fn barrage_path(video_id: &str, second: i64, kind: &str) -> String {
    format!("{BARRAGES_ROOT}/{video_id}/{second}/{kind}")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("realtime store not initialized on this page")]
    Unavailable,
    #[error("store read was dropped before a value arrived")]
    Cancelled,
    #[error("transaction rejected: {0}")]
    Transaction(String),
}

/// Handle to the page's realtime store.
pub struct RealtimeStore {
    db: JsValue,
    ref_fn: Function,
    on_value_fn: Function,
    run_transaction_fn: Function,
}

fn window_fn(window: &web_sys::Window, name: &str) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()?
        .dyn_into()
        .ok()
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Calls `.val()` on a store snapshot.
fn snapshot_val(snapshot: &JsValue) -> JsValue {
    let Ok(val_fn) = Reflect::get(snapshot, &JsValue::from_str("val")) else {
        return JsValue::NULL;
    };
    val_fn
        .dyn_into::<Function>()
        .ok()
        .and_then(|f| f.call0(snapshot).ok())
        .unwrap_or(JsValue::NULL)
}

impl RealtimeStore {
    /// Picks up the store handle the page exposes, if it exists yet.
    pub fn connect() -> Option<Rc<Self>> {
        let window = web_sys::window()?;
        let db = Reflect::get(&window, &JsValue::from_str("db")).ok()?;
        if db.is_undefined() || db.is_null() {
            return None;
        }
        Some(Rc::new(Self {
            db,
            ref_fn: window_fn(&window, "fb_ref")?,
            on_value_fn: window_fn(&window, "fb_onValue")?,
            run_transaction_fn: window_fn(&window, "fb_runTransaction")?,
        }))
    }

    fn path_ref(&self, path: &str) -> Result<JsValue, StoreError> {
        self.ref_fn
            .call2(&JsValue::NULL, &self.db, &JsValue::from_str(path))
            .map_err(|_| StoreError::Unavailable)
    }

    /// Live subscription to a numeric counter. The callback receives
    /// every remote update, with a missing value reading as 0. The
    /// subscription ends when the returned guard is dropped.
    pub fn subscribe_counter(
        &self,
        path: &str,
        on_change: Callback<i64>,
    ) -> Result<CounterSubscription, StoreError> {
        let reference = self.path_ref(path)?;
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |snapshot: JsValue| {
            let count = snapshot_val(&snapshot).as_f64().unwrap_or(0.0) as i64;
            on_change.emit(count);
        });
        let unsubscribe = self
            .on_value_fn
            .call2(&JsValue::NULL, &reference, handler.as_ref())
            .map_err(|_| StoreError::Unavailable)?
            .dyn_into::<Function>()
            .ok();
        Ok(CounterSubscription {
            unsubscribe,
            _handler: handler,
        })
    }

    /// One-shot read of a path whose value is a `{kind: count}` map.
    /// A missing value yields an empty list.
    pub async fn read_counts_once(&self, path: &str) -> Result<Vec<(String, u32)>, StoreError> {
        let reference = self.path_ref(path)?;

        let (tx, rx) = futures::channel::oneshot::channel::<JsValue>();
        let handler = Closure::once_into_js(move |snapshot: JsValue| {
            let _ = tx.send(snapshot_val(&snapshot));
        });
        let options = js_sys::Object::new();
        let _ = Reflect::set(&options, &JsValue::from_str("onlyOnce"), &JsValue::TRUE);

        self.on_value_fn
            .call3(&JsValue::NULL, &reference, &handler, &options)
            .map_err(|_| StoreError::Unavailable)?;

        let value = rx.await.map_err(|_| StoreError::Cancelled)?;
        if value.is_null() || value.is_undefined() {
            return Ok(Vec::new());
        }

        let mut counts = Vec::new();
        for entry in js_sys::Object::entries(value.unchecked_ref()).iter() {
            let entry: js_sys::Array = entry.unchecked_into();
            let Some(kind) = entry.get(0).as_string() else {
                continue;
            };
            let count = entry.get(1).as_f64().unwrap_or(0.0).max(0.0) as u32;
            counts.push((kind, count));
        }
        Ok(counts)
    }

    /// Atomic read-modify-write of a numeric counter. The transform
    /// may be invoked more than once if the store retries on conflict.
    pub async fn run_transaction<F>(&self, path: &str, transform: F) -> Result<(), StoreError>
    where
        F: Fn(Option<i64>) -> i64 + 'static,
    {
        let reference = self.path_ref(path)?;
        let transform = Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |current: JsValue| {
            let next = transform(current.as_f64().map(|v| v as i64));
            JsValue::from_f64(next as f64)
        });

        let promise: js_sys::Promise = self
            .run_transaction_fn
            .call2(&JsValue::NULL, &reference, transform.as_ref())
            .map_err(|_| StoreError::Unavailable)?
            .dyn_into()
            .map_err(|_| StoreError::Unavailable)?;

        let result = JsFuture::from(promise).await;
        drop(transform);
        result
            .map(|_| ())
            .map_err(|e| StoreError::Transaction(describe(&e)))
    }
}

// Needed so components can carry Rc<RealtimeStore> in their props.
// One page has at most one store handle.
impl PartialEq for RealtimeStore {
    fn eq(&self, other: &Self) -> bool {
        self.db == other.db
    }
}

/// Keeps a counter subscription alive; dropping it unsubscribes.
pub struct CounterSubscription {
    unsubscribe: Option<Function>,
    _handler: Closure<dyn FnMut(JsValue)>,
}

impl Drop for CounterSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            let _ = unsubscribe.call0(&JsValue::NULL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_store_paths() {
        assert_eq!(reaction_path("vid", "like"), "video_reactions/vid/like");
        assert_eq!(barrage_second_path("vid", 42), "barrages/vid/42");
        assert_eq!(barrage_path("vid", 42, "clap"), "barrages/vid/42/clap");
    }
}
