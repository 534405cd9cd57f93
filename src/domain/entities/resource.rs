//! Fetchable resource identity and payload.

use std::sync::Arc;

/// Decoded image shared between the cache and every row displaying it.
pub type Resource = Arc<image::DynamicImage>;

/// Identifier of a fetchable resource. In practice the resource URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new `ResourceId` from any string-like input.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL this id points at.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_compare_by_url() {
        let a = ResourceId::new("https://example.com/a.png");
        let b: ResourceId = "https://example.com/a.png".into();
        assert_eq!(a, b);
        assert_ne!(a, ResourceId::new("https://example.com/b.png"));
        assert_eq!(a.to_string(), "https://example.com/a.png");
    }
}
