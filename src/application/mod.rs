//! Application layer with search sessions, row bindings and task slots.

/// Search and row services.
pub mod services;
/// Cancellable task slots.
pub mod tasks;

pub use services::{IconState, RowBinding, SearchController};
pub use tasks::{CancellableTaskSlot, CancellationFlag, TaskHandle};
