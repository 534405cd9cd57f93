//! Catalog result entity.

use std::hash::{Hash, Hasher};

use super::ResourceId;

/// Stable catalog identifier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single search result.
///
/// Identity is the catalog id alone: two items with the same id are equal even
/// when their display fields differ, so re-fetched results diff as updates of
/// the same row instead of removals plus insertions.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    bundle_id: String,
    position: usize,
    name: String,
    developer: String,
    rating: f64,
    store_url: String,
    icon_url: ResourceId,
    screenshot_urls: Vec<ResourceId>,
}

impl Item {
    /// Creates an item with the fields a row needs to render.
    #[must_use]
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        developer: impl Into<String>,
        icon_url: impl Into<ResourceId>,
    ) -> Self {
        Self {
            id,
            bundle_id: String::new(),
            position: 0,
            name: name.into(),
            developer: developer.into(),
            rating: 0.0,
            store_url: String::new(),
            icon_url: icon_url.into(),
            screenshot_urls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = bundle_id.into();
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    #[must_use]
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = url.into();
        self
    }

    #[must_use]
    pub fn with_screenshots(mut self, urls: Vec<ResourceId>) -> Self {
        self.screenshot_urls = urls;
        self
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    /// Index of the record in the catalog response.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn developer(&self) -> &str {
        &self.developer
    }

    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    /// Thumbnail resource shown next to the row.
    #[must_use]
    pub const fn icon_url(&self) -> &ResourceId {
        &self.icon_url
    }

    #[must_use]
    pub fn screenshot_urls(&self) -> &[ResourceId] {
        &self.screenshot_urls
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_display_fields() {
        let first = Item::new(ItemId(7), "Mail", "Acme", "https://a/icon.png").with_rating(4.5);
        let refetched =
            Item::new(ItemId(7), "Mail Pro", "Acme Inc", "https://b/icon.png").with_rating(3.0);

        assert_eq!(first, refetched);

        let mut set = HashSet::new();
        set.insert(first);
        assert!(!set.insert(refetched));
    }

    #[test]
    fn test_different_ids_are_distinct() {
        let a = Item::new(ItemId(1), "Chat", "Acme", "https://a/icon.png");
        let b = Item::new(ItemId(2), "Chat", "Acme", "https://a/icon.png");
        assert_ne!(a, b);
    }
}
