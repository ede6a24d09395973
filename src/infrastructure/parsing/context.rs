//! Parsing context for vacancy pages

use crate::domain::ListingUrl;
use url::Url;

/// Context for parsing a listing index page
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// 1-based number of the index page in crawl order
    pub page_id: u32,

    /// URL the page was fetched from; relative links resolve against it
    pub page_url: Url,
}

impl ParseContext {
    pub fn new(page_id: u32, page_url: Url) -> Self {
        Self { page_id, page_url }
    }
}

/// Context for parsing a listing detail page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Detail page URL, copied into the record
    pub url: Url,

    /// Index page where this listing was found
    pub source_page_id: Option<u32>,

    /// Position within that index page
    pub source_index: Option<u32>,
}

impl DetailParseContext {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            source_page_id: None,
            source_index: None,
        }
    }

    /// Set source information
    pub fn with_source(mut self, page_id: u32, index: u32) -> Self {
        self.source_page_id = Some(page_id);
        self.source_index = Some(index);
        self
    }
}

impl From<&ListingUrl> for DetailParseContext {
    fn from(listing_url: &ListingUrl) -> Self {
        Self::new(listing_url.url.clone())
            .with_source(listing_url.page_id, listing_url.index_in_page)
    }
}
