use reqwest::Url;
use serde::Deserialize;

use crate::domain::entities::{Item, ItemId, ResourceId};

/// Search endpoint response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of records reported by the server.
    #[serde(default)]
    pub result_count: usize,
    /// Result records in ranking order.
    pub results: Vec<ResultEntry>,
}

/// One software record of the search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub track_id: u64,
    pub track_name: String,
    pub bundle_id: String,
    pub track_view_url: String,
    #[serde(rename = "artworkUrl512")]
    pub artwork_url_512: String,
    pub artist_name: String,
    /// Absent on some records; treated as no screenshots instead of failing
    /// the whole response.
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    /// Unrated apps omit the field; they decode with a rating of 0 rather
    /// than rejecting the whole response.
    #[serde(default)]
    pub average_user_rating: f64,
}

impl ResultEntry {
    /// Converts the record into an item at `position`.
    ///
    /// Returns `None` when the store or artwork URL is not a valid URL.
    /// Invalid screenshot URLs are dropped individually.
    #[must_use]
    pub fn into_item(self, position: usize) -> Option<Item> {
        let store_url = Url::parse(&self.track_view_url).ok()?;
        let icon_url = Url::parse(&self.artwork_url_512).ok()?;
        let screenshots = self
            .screenshot_urls
            .iter()
            .filter_map(|s| Url::parse(s).ok())
            .map(|u| ResourceId::new(u.as_str()))
            .collect();

        Some(
            Item::new(
                ItemId(self.track_id),
                self.track_name,
                self.artist_name,
                icon_url.as_str(),
            )
            .with_bundle_id(self.bundle_id)
            .with_position(position)
            .with_rating(self.average_user_rating)
            .with_store_url(store_url.as_str())
            .with_screenshots(screenshots),
        )
    }
}

impl SearchResponse {
    /// Converts every valid record, keeping the response index as position.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.results
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| entry.into_item(position))
            .collect()
    }
}
