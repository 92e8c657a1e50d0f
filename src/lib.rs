//! # granthive
//!
//! Leptos + WASM frontend for GrantHive, the scholarship marketplace
//! connecting students and institutions.
//!
//! Session rules (token decoding, the login attempt lifecycle, route guard
//! decisions) live in the `session` crate. This crate supplies the browser
//! pieces around it: `localStorage` token persistence, the `gloo-net`
//! transport, reactive context wiring, and the pages.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
