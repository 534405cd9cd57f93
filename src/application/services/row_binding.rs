//! Per-row icon binding.
//!
//! A row is a reusable display unit. Each one owns a single task slot for its
//! whole life; binding new content always replaces or clears the slot first,
//! so a late icon for the previous item can never land on the new one.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::application::tasks::CancellableTaskSlot;
use crate::domain::entities::{Item, Resource, ResourceId};
use crate::infrastructure::image::FetchCoordinator;

/// Icon display state of a row.
#[derive(Debug, Clone, Default)]
pub enum IconState {
    /// Nothing bound.
    #[default]
    Empty,
    /// Fetch in flight for `ResourceId`.
    Loading(ResourceId),
    /// Icon ready for display.
    Ready(ResourceId, Resource),
    /// Load failed; the fixed placeholder is shown instead.
    Placeholder(ResourceId),
}

impl IconState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Resource id the state refers to, if any.
    #[must_use]
    pub const fn resource_id(&self) -> Option<&ResourceId> {
        match self {
            Self::Empty => None,
            Self::Loading(id) | Self::Ready(id, _) | Self::Placeholder(id) => Some(id),
        }
    }
}

/// A reusable result row and its icon loading slot.
pub struct RowBinding {
    index: usize,
    item: Option<Item>,
    icon: Arc<watch::Sender<IconState>>,
    slot: CancellableTaskSlot,
    coordinator: Arc<FetchCoordinator>,
}

impl std::fmt::Debug for RowBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBinding")
            .field("index", &self.index)
            .field("item", &self.item.as_ref().map(Item::id))
            .field("icon", &*self.icon.borrow())
            .finish_non_exhaustive()
    }
}

impl RowBinding {
    #[must_use]
    pub fn new(index: usize, coordinator: Arc<FetchCoordinator>) -> Self {
        let (icon, _) = watch::channel(IconState::Empty);
        Self {
            index,
            item: None,
            icon: Arc::new(icon),
            slot: CancellableTaskSlot::new(),
            coordinator,
        }
    }

    /// Binds `item` to this row and starts loading its icon.
    ///
    /// Cached icons are shown immediately without spawning anything.
    pub fn bind(&mut self, item: Item) {
        let url = item.icon_url().clone();
        self.item = Some(item);
        self.slot.clear();

        if let Some(resource) = self.coordinator.cached(&url) {
            trace!(row = self.index, id = %url, "Icon served from cache");
            self.icon.send_replace(IconState::Ready(url, resource));
            return;
        }

        self.icon.send_replace(IconState::Loading(url.clone()));

        let icon = self.icon.clone();
        let coordinator = self.coordinator.clone();
        let row = self.index;
        self.slot.replace(move |flag| async move {
            if flag.is_cancelled() {
                return;
            }

            let next = match coordinator.load_unless(&url, || flag.is_cancelled()).await {
                Ok(Some(resource)) => IconState::Ready(url.clone(), resource),
                Ok(None) => {
                    trace!(row, id = %url, "Icon load dropped before download");
                    return;
                }
                Err(e) => {
                    debug!(row, id = %url, error = %e, "Icon load failed, using placeholder");
                    IconState::Placeholder(url.clone())
                }
            };

            if !flag.commit(&*icon, next) {
                trace!(row, id = %url, "Discarded icon for rebound row");
            }
        });
    }

    /// Detaches the current item, cancelling any icon load in flight.
    pub fn unbind(&mut self) {
        self.slot.clear();
        self.item = None;
        self.icon.send_replace(IconState::Empty);
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Current icon state.
    #[must_use]
    pub fn icon(&self) -> IconState {
        self.icon.borrow().clone()
    }

    /// Receiver notified on every icon state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<IconState> {
        self.icon.subscribe()
    }

    /// Returns true while an icon load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.slot.is_active()
    }
}
