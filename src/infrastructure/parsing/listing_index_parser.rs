//! Listing index parser
//!
//! Link discovery for search result pages: every listing detail link on the
//! page, in document order, plus the trailing pagination link if present.

#![allow(clippy::uninlined_format_args)]

use super::config::ListingIndexSelectors;
use super::{compile_selector, ContextualParser, ParseContext, ParsingConfig, ParsingError, ParsingResult};
use crate::domain::{ListingIndexPage, ListingUrl};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Parser for listing index pages
pub struct ListingIndexParser {
    listing_link_selector: Selector,
    next_page_selector: Selector,
}

impl ListingIndexParser {
    /// Create a parser with the default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ParsingConfig::default().listing_index_selectors)
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &ListingIndexSelectors) -> ParsingResult<Self> {
        Ok(Self {
            listing_link_selector: compile_selector(&selectors.listing_link)?,
            next_page_selector: compile_selector(&selectors.next_page_link)?,
        })
    }

    /// Absolute URL of the next index page, if the page has a trailing pagination link
    pub fn next_page_url(&self, html: &Html, page_url: &Url) -> Option<Url> {
        let href = html
            .select(&self.next_page_selector)
            .next()
            .and_then(|link| link.value().attr("href"))?;

        match resolve_url(page_url, href) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Ignoring pagination link: {}", e);
                None
            }
        }
    }
}

impl ContextualParser for ListingIndexParser {
    type Output = ListingIndexPage;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Discovering listing links on page {} ({})", context.page_id, context.page_url);

        let detail_urls: Vec<ListingUrl> = html
            .select(&self.listing_link_selector)
            .filter_map(|link| link.value().attr("href"))
            .filter_map(|href| match resolve_url(&context.page_url, href) {
                Ok(url) => Some(url),
                Err(e) => {
                    debug!("Skipping listing link: {}", e);
                    None
                }
            })
            .enumerate()
            .map(|(index, url)| {
                ListingUrl::new(url, context.page_id, u32::try_from(index).unwrap_or(u32::MAX))
            })
            .collect();

        let next_page = self.next_page_url(html, &context.page_url);

        debug!(
            "Page {}: {} listing links, next page: {}",
            context.page_id,
            detail_urls.len(),
            next_page.as_ref().map_or("none", Url::as_str)
        );

        Ok(ListingIndexPage {
            detail_urls,
            next_page,
        })
    }
}

/// Resolve an href against the page it appeared on
pub fn resolve_url(page_url: &Url, href: &str) -> ParsingResult<Url> {
    let href = href.trim();
    if href.is_empty() {
        return Err(ParsingError::UrlResolutionFailed {
            url: String::new(),
            reason: "empty href".to_string(),
            base_url: Some(page_url.to_string()),
        });
    }

    page_url.join(href).map_err(|e| ParsingError::UrlResolutionFailed {
        url: href.to_string(),
        reason: format!("Failed to join URL: {e}"),
        base_url: Some(page_url.to_string()),
    })
}
