//! Domain entity definitions.

mod item;
mod resource;

pub use item::{Item, ItemId};
pub use resource::{Resource, ResourceId};
