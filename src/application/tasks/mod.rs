//! Cooperative cancellation primitives shared by rows and the search screen.

mod flag;
mod slot;

pub use flag::CancellationFlag;
pub use slot::{CancellableTaskSlot, TaskHandle};
