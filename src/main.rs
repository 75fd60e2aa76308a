use log::Level;

mod components;
mod consts;
mod engine;
mod geometry;
mod model;
mod render;
mod state;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    // Only fails when a logger is already installed.
    let _ = console_log::init_with_level(level);
    yew::Renderer::<App>::new().render();
}
