mod app;
mod components;
mod editor_view;
mod image_loader;
mod properties_panel;
mod utils;

pub mod config;
pub mod editor;
pub mod error;
pub mod placement;
pub mod properties;
pub mod render;
pub mod scene;
pub mod surface;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
