//! Presentation layer: console rendering and the interactive loop.

mod app;
mod console;

pub use app::App;
pub use console::{Console, ICON_PLACEHOLDER, format_rating, format_row, icon_label};
