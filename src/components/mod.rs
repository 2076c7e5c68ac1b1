pub mod app;
pub mod clock_view;
pub mod end_view;
pub mod intro_overlay;
pub mod nav_bar;
pub mod resistance_view;
pub mod time_display;

pub use app::App;
