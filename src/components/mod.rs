pub mod app;
pub mod control_surface;

pub use app::App;
