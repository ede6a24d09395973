//! Vacancy Scraper - djinni.co job listing crawler
//!
//! Discovers listing pages by following pagination, extracts one flat
//! [`ListingRecord`] per listing detail page and writes the records as
//! JSON lines.

pub mod domain;
pub mod infrastructure;

pub use domain::{ListingIndexPage, ListingRecord, ListingUrl, TechnologyVocabulary};
pub use infrastructure::{
    AppConfig, ContextualParser, CrawlSettings, CrawlSummary, HttpClient, ListingDetailParser,
    ListingIndexParser, PageFetcher, RecordSink, VacancyCrawler,
};
