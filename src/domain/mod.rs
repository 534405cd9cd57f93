//! Domain layer with core entities, search state and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Search state machine.
pub mod search_state;

pub use entities::{Item, ItemId, Resource, ResourceId};
pub use errors::FetchError;
pub use ports::{CatalogPort, ResourceCachePort, ResourceTransport};
pub use search_state::SearchState;
