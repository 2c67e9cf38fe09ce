//! # client
//!
//! Leptos + WASM single-page front end for AllerPredict.
//!
//! The page is a thin binding over `session::AnalysisSession`: components
//! read the session from a reactive signal and call its methods, and the
//! `actions` module runs network calls between the two phases of each
//! submission.

pub mod actions;
pub mod app;
pub mod components;
pub mod net;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
