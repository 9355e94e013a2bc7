mod components;
mod config;
mod connection;
mod error;
mod model;
mod state;
mod stream;
mod surface;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("touch remote starting");
    yew::Renderer::<components::App>::new().render();
}
