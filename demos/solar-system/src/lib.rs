use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod galaxies;
pub mod game;
pub mod info;

use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Info panel contents as JSON (`name`, `description`, `fact`), or
/// `undefined` while the panel is closed.
#[wasm_bindgen]
pub fn get_info_json() -> Option<String> {
    with_runner(|r| r.game().shown_info_json(r.context())).flatten()
}

#[wasm_bindgen]
pub fn is_menu_open() -> bool {
    with_runner(|r| r.game().menu_open()).unwrap_or(false)
}
