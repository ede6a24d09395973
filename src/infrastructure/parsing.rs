//! HTML parsing for vacancy pages
//!
//! Two parsers share one trait: [`ListingIndexParser`] discovers detail links
//! and the next index page, [`ListingDetailParser`] turns one detail page into
//! a [`ListingRecord`](crate::domain::ListingRecord). Both are immutable after
//! construction and pure: no I/O, no shared mutable state.

#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod context;
pub mod error;
pub mod listing_detail_parser;
pub mod listing_index_parser;
pub mod publication_date;

pub use config::{AdditionalInfoRule, InfoField, ParsingConfig};
pub use context::{DetailParseContext, ParseContext};
pub use error::{ParsingError, ParsingResult};
pub use listing_detail_parser::ListingDetailParser;
pub use listing_index_parser::ListingIndexParser;

use scraper::{Html, Selector};
use tracing::warn;

/// Parser trait with context support
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse an already-built document
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;

    /// Parse a raw response body.
    ///
    /// The document is built and dropped inside this call so callers in async
    /// code never hold it across an await point.
    fn parse_body(&self, body: &str, context: &Self::Context) -> ParsingResult<Self::Output> {
        if body.trim().is_empty() {
            return Err(ParsingError::malformed_document("response body is empty", None));
        }
        let html = Html::parse_document(body);
        self.parse_with_context(&html, context)
    }
}

/// Compile one configured selector
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        warn!("Failed to compile selector '{}': {}", selector, e);
        ParsingError::invalid_selector(selector, e)
    })
}
