//! Overlay-Live Client
//!
//! Yew WASM companion overlay for an embedded third-party video
//! player: synced captions, persisted progress, fullscreen handling
//! and the shared reaction/barrage layer.
//!
//! This crate is WASM-only. Use `trunk build` or `cargo check --target wasm32-unknown-unknown`.

#[cfg(not(target_arch = "wasm32"))]
compile_error!(
    "overlay-client only supports wasm32 target. Use: cargo check -p overlay-client --target wasm32-unknown-unknown"
);

mod app;
mod components;
mod config;
mod hooks;
mod player;
mod storage;
mod store;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for wasm with tracing-web
    let filter = EnvFilter::new("info");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
