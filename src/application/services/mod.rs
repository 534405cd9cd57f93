pub mod row_binding;
pub mod search_controller;

pub use row_binding::{IconState, RowBinding};
pub use search_controller::SearchController;
