/// Tab URL Exporter - Browser extension popup listing the current window's tab URLs
/// Built with Rust + WASM + Yew

mod browser;
mod config;
mod controller;
mod error;
mod export;
mod notification;
mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
