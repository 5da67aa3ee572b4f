//! WASM bindings for the radar-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The host owns the polling timer and the HTTP fetch; it passes every
//! response through `ingest_feed` and lays the radar out again with a fresh
//! seed whenever the data changes. Seeds are `u64`, so JavaScript passes a
//! `BigInt`, e.g. `BigInt(Math.floor(Math.random() * 2 ** 53))`.

use wasm_bindgen::prelude::*;

use crate::feed::{ingest_serialized, DEFAULT_ENDPOINT, DEFAULT_REFRESH_INTERVAL_MS};
use crate::setup::sample_setup;
use crate::render_radar;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// Lay out a radar setup document and return the renderer JSON.
#[wasm_bindgen]
pub fn layout_radar(input: &str, seed: u64) -> String {
    let output = render_radar(input, seed);
    if let Some(error) = &output.error {
        console_error(&format!("Error laying out radar: {}", error.message));
    }
    output.to_json()
}

/// Validate a polled response and return the data to lay out next.
/// Returns `current_data` unchanged if the response failed or is not usable JSON.
#[wasm_bindgen]
pub fn ingest_feed(current_data: &str, status: u16, content_type: &str, body: &str) -> String {
    let (next, error) = ingest_serialized(current_data, status, content_type, body);
    if let Some(e) = error {
        console_error(&format!("Error fetching data: {}", e));
    }
    next
}

/// The sample setup shipped with the original radar page, as JSON.
#[wasm_bindgen]
pub fn default_setup() -> String {
    serde_json::to_string(&sample_setup()).unwrap_or_else(|_| "{}".to_string())
}

#[wasm_bindgen]
pub fn feed_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[wasm_bindgen]
pub fn feed_refresh_interval_ms() -> u32 {
    DEFAULT_REFRESH_INTERVAL_MS
}
