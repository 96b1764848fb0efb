//! Inspection Checklist Frontend Entry Point

mod admin;
mod app;
mod components;
mod filter;
mod models;
mod routing;
mod services;
mod session;
mod template;
mod time;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
