#![allow(clippy::uninlined_format_args)]

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Detail page URL together with where it was discovered.
/// Carried from link discovery to field extraction so log lines can point back at the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingUrl {
    /// Absolute listing detail page URL
    pub url: Url,
    /// 1-based number of the index page the link was found on
    pub page_id: u32,
    /// 0-based position within that index page
    pub index_in_page: u32,
}

impl ListingUrl {
    pub fn new(url: Url, page_id: u32, index_in_page: u32) -> Self {
        Self {
            url,
            page_id,
            index_in_page,
        }
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// (page_id, index_in_page)
    pub fn position(&self) -> (u32, u32) {
        (self.page_id, self.index_in_page)
    }
}

impl From<ListingUrl> for Url {
    fn from(listing_url: ListingUrl) -> Self {
        listing_url.url
    }
}

impl AsRef<str> for ListingUrl {
    fn as_ref(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ListingUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (page: {}, index: {})",
            self.url, self.page_id, self.index_in_page
        )
    }
}

/// Everything link discovery learns from one index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingIndexPage {
    pub detail_urls: Vec<ListingUrl>,
    pub next_page: Option<Url>,
}

impl ListingIndexPage {
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let url = Url::parse("https://djinni.co/jobs/42-python/").unwrap();
        let listing_url = ListingUrl::new(url, 3, 7);

        assert_eq!(listing_url.position(), (3, 7));
        assert_eq!(
            listing_url.to_string(),
            "https://djinni.co/jobs/42-python/ (page: 3, index: 7)"
        );
    }

    #[test]
    fn test_listing_url_json_round_trip() {
        let url = Url::parse("https://djinni.co/jobs/42-python/").unwrap();
        let listing_url = ListingUrl::new(url, 2, 5);

        let json = serde_json::to_string(&listing_url).unwrap();
        assert!(json.contains("\"url\":\"https://djinni.co/jobs/42-python/\""));

        let parsed: ListingUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, listing_url);
    }
}
