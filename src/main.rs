#![allow(warnings)]
//! Todo Frontend Entry Point

mod models;
mod config;
mod commands;
mod picker;
mod form;
mod todos;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    console_log::init_with_level(level).ok();
    mount_to_body(App);
}
