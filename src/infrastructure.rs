//! Infrastructure layer for fetching, parsing, configuration and output
//!
//! This module provides the HTML parsers, the rate-limited HTTP client,
//! the crawl driver, record sinks and the logging/configuration setup.

pub mod config; // Layered configuration and site constants
pub mod crawler; // Crawl driver over a PageFetcher
pub mod http_client;
pub mod logging; // Logging infrastructure
pub mod parsing; // Index and detail page parsers
pub mod parsing_error;
pub mod record_sink; // JSON lines output

// Re-export commonly used items
pub use config::{djinni, AppConfig, ConfigError, CrawlingConfig, LoggingConfig, OutputConfig};
pub use crawler::{CrawlSettings, CrawlSummary, VacancyCrawler};
pub use http_client::{HttpClient, HttpClientConfig, PageFetcher};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{
    ContextualParser, DetailParseContext, ListingDetailParser, ListingIndexParser, ParseContext,
    ParsingConfig, ParsingError, ParsingResult,
};
pub use record_sink::{JsonLinesSink, MemorySink, RecordSink};
