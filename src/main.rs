//! Pet Companion Frontend Entry Point

mod models;
mod settings;
mod format;
mod hotkey;
mod debounce;
mod bindings;
mod panels;
mod interaction;
mod avatar;
mod commands;
mod store;
mod context;
mod dom;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(err) = rolling_logger::init(level) {
        web_sys::console::warn_1(&format!("logger init failed: {}", err).into());
    }
    log::info!("pet companion ui starting");
    mount_to_body(App);
}
