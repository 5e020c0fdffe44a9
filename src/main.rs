#![allow(warnings)]
//! Campus Connect Frontend Entry Point

mod actions;
mod api;
mod app;
mod browser;
mod chat;
mod components;
mod config;
mod context;
mod filters;
mod forms;
mod loader;
mod markdown;
mod models;
mod nav;
mod pages;
mod routes;
mod session;
mod socket;
mod store;
mod time;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = config::init(config::AppConfig::from_document());
    let logs = rolling_logger::init(rolling_logger::parse_level(&config.log_level), rolling_logger::DEFAULT_CAPACITY);
    tracing::info!("[app] starting, api at {}", config.api_base);

    mount_to_body(move || view! { <App logs=logs.clone()/> });
}
