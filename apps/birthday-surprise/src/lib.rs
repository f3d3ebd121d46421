use wasm_bindgen::prelude::*;

pub mod candle;
pub mod config;
pub mod content;
pub mod decor;
pub mod error;
pub mod events;
pub mod sequencer;
pub mod show;
pub mod stage;
pub mod stages;
use show::BirthdaySurprise;

keepsake_web::export_show!(BirthdaySurprise, "birthday-surprise");

/// Memories, stories, screen copy and the letter as JSON, for the host's DOM.
#[wasm_bindgen]
pub fn show_content_json() -> String {
    with_runner(|r| r.show().content().to_json())
        .and_then(|json| json.map_err(|err| log::error!("content serialization failed: {}", err)).ok())
        .unwrap_or_else(|| "{}".to_string())
}

/// Name of the stage on screen (`"fullscreen"`, `"auth"`, ... `"done"`).
#[wasm_bindgen]
pub fn show_current_stage() -> String {
    with_runner(|r| r.show().current_stage().name().to_string()).unwrap_or_default()
}

/// URL of the external fireworks script the host should load on `FIREWORKS_ACQUIRE`.
#[wasm_bindgen]
pub fn show_fireworks_script() -> String {
    with_runner(|r| r.show().settings().fireworks.script_url.clone()).unwrap_or_default()
}
