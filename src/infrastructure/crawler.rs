//! Crawl driver
//!
//! Walks listing index pages one after another, following the pagination
//! link, and fetches the detail pages of each index page with bounded
//! concurrency. Every detail page yields zero or one record.

#![allow(clippy::uninlined_format_args)]

use std::collections::HashSet;
use std::fmt;
use std::pin::pin;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{ListingRecord, ListingUrl};
use crate::infrastructure::config::{defaults, djinni, CrawlingConfig};
use crate::infrastructure::http_client::PageFetcher;
use crate::infrastructure::parsing::{
    ContextualParser, DetailParseContext, ListingDetailParser, ListingIndexParser, ParseContext,
};
use crate::infrastructure::record_sink::RecordSink;

/// Limits for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Stop after this many index pages
    pub max_pages: Option<u32>,
    /// Detail pages in flight at once
    pub max_concurrent_details: usize,
    /// Hosts that may be fetched, subdomains included; empty allows any host
    pub allowed_domains: Vec<String>,
}

impl CrawlSettings {
    /// Whether `url` points at an allowed host
    pub fn is_allowed(&self, url: &Url) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        self.allowed_domains.iter().any(|domain| {
            let domain = domain.trim().trim_start_matches('.').to_ascii_lowercase();
            host == domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages: None,
            max_concurrent_details: defaults::MAX_CONCURRENT_DETAILS,
            allowed_domains: vec![djinni::DOMAIN.to_string()],
        }
    }
}

impl From<&CrawlingConfig> for CrawlSettings {
    fn from(config: &CrawlingConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_concurrent_details: config.max_concurrent_details,
            allowed_domains: config.allowed_domains.clone(),
        }
    }
}

/// Counters reported at the end of a crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub index_pages: u32,
    pub detail_pages: u32,
    pub records: u32,
    pub skipped_records: u32,
    pub fetch_failures: u32,
    pub offsite_links: u32,
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} index pages, {} detail pages, {} records, {} skipped, {} fetch failures, {} off-site links",
            self.index_pages,
            self.detail_pages,
            self.records,
            self.skipped_records,
            self.fetch_failures,
            self.offsite_links
        )
    }
}

enum DetailOutcome {
    Record(Box<ListingRecord>),
    Skipped,
    FetchFailed,
}

/// Drives link discovery and extraction over a [`PageFetcher`]
pub struct VacancyCrawler<F: PageFetcher> {
    fetcher: F,
    index_parser: ListingIndexParser,
    detail_parser: ListingDetailParser,
    settings: CrawlSettings,
}

impl<F: PageFetcher> VacancyCrawler<F> {
    pub fn new(
        fetcher: F,
        index_parser: ListingIndexParser,
        detail_parser: ListingDetailParser,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            index_parser,
            detail_parser,
            settings,
        }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Crawl from `start_url` until pagination ends or `max_pages` is reached.
    ///
    /// Only a failed start page fetch or a sink error aborts the crawl.
    pub async fn run(&self, start_url: &Url, sink: &mut dyn RecordSink) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut next_page = Some(start_url.clone());

        info!("Starting crawl at {}", start_url);

        while let Some(page_url) = next_page.take() {
            if self.settings.max_pages.is_some_and(|max| summary.index_pages >= max) {
                info!("Reached page limit of {} index pages", summary.index_pages);
                break;
            }
            if !visited.insert(page_url.clone()) {
                warn!("Pagination points back to {}, stopping", page_url);
                break;
            }

            let page_id = summary.index_pages + 1;
            let body = match self.fetcher.fetch(&page_url).await {
                Ok(body) => body,
                Err(e) if page_id == 1 => {
                    return Err(e.context(format!("Failed to fetch start page {page_url}")));
                }
                Err(e) => {
                    warn!("Failed to fetch index page {}: {:#}", page_url, e);
                    summary.fetch_failures += 1;
                    break;
                }
            };
            summary.index_pages = page_id;

            let context = ParseContext::new(page_id, page_url.clone());
            let page = match self.index_parser.parse_body(&body, &context) {
                Ok(page) => page,
                Err(e) => {
                    warn!("Could not read index page {}: {}", page_url, e);
                    break;
                }
            };

            info!(
                "Index page {}: {} listings{}",
                page_id,
                page.detail_urls.len(),
                if page.is_last() { ", last page" } else { "" }
            );

            next_page = page.next_page.filter(|url| {
                let allowed = self.settings.is_allowed(url);
                if !allowed {
                    debug!("Not following off-site pagination link {}", url);
                    summary.offsite_links += 1;
                }
                allowed
            });

            let detail_urls: Vec<ListingUrl> = page
                .detail_urls
                .into_iter()
                .filter(|listing_url| {
                    let allowed = self.settings.is_allowed(&listing_url.url);
                    if !allowed {
                        debug!("Skipping off-site listing {}", listing_url);
                        summary.offsite_links += 1;
                    }
                    allowed
                })
                .collect();

            self.process_details(detail_urls, sink, &mut summary).await?;
        }

        sink.flush().context("Failed to flush record sink")?;
        info!("Crawl finished: {}", summary);
        Ok(summary)
    }

    async fn process_details(
        &self,
        detail_urls: Vec<ListingUrl>,
        sink: &mut dyn RecordSink,
        summary: &mut CrawlSummary,
    ) -> Result<()> {
        let mut outcomes = pin!(stream::iter(detail_urls)
            .map(|listing_url| self.fetch_and_extract(listing_url))
            .buffer_unordered(self.settings.max_concurrent_details.max(1)));

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                DetailOutcome::Record(record) => {
                    summary.detail_pages += 1;
                    sink.write(&record)
                        .with_context(|| format!("Failed to write record for {}", record.url))?;
                    summary.records += 1;
                }
                DetailOutcome::Skipped => {
                    summary.detail_pages += 1;
                    summary.skipped_records += 1;
                }
                DetailOutcome::FetchFailed => summary.fetch_failures += 1,
            }
        }

        Ok(())
    }

    async fn fetch_and_extract(&self, listing_url: ListingUrl) -> DetailOutcome {
        let body = match self.fetcher.fetch(&listing_url.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch listing {}: {:#}", listing_url, e);
                return DetailOutcome::FetchFailed;
            }
        };

        let context = DetailParseContext::from(&listing_url);
        match self.detail_parser.parse_body(&body, &context) {
            Ok(record) => {
                debug!("Extracted listing {}", listing_url);
                DetailOutcome::Record(Box::new(record))
            }
            Err(e) => {
                warn!("Skipping listing {}: {}", listing_url, e);
                DetailOutcome::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::record_sink::MemorySink;
    use async_trait::async_trait;
    use rstest::rstest;
    use std::collections::HashMap;

    struct StaticFetcher(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.0
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("404 for {url}"))
        }
    }

    fn crawler(pages: &[(&str, &str)], settings: CrawlSettings) -> VacancyCrawler<StaticFetcher> {
        let pages = pages
            .iter()
            .map(|(url, body)| ((*url).to_string(), (*body).to_string()))
            .collect();
        VacancyCrawler::new(
            StaticFetcher(pages),
            ListingIndexParser::new().unwrap(),
            ListingDetailParser::new().unwrap(),
            settings,
        )
    }

    const SELF_LINKED_INDEX: &str = r#"
        <a class="job-list-item__link" href="/jobs/1/">One</a>
        <ul class="pagination"><li><a href="/jobs/">again</a></li></ul>
    "#;

    #[tokio::test]
    async fn test_start_page_failure_aborts() {
        let crawler = crawler(&[], CrawlSettings::default());
        let mut sink = MemorySink::new();
        let start = Url::parse("https://djinni.co/jobs/").unwrap();
        assert!(crawler.run(&start, &mut sink).await.is_err());
    }

    #[tokio::test]
    async fn test_pagination_loop_stops() {
        let crawler = crawler(
            &[
                ("https://djinni.co/jobs/", SELF_LINKED_INDEX),
                ("https://djinni.co/jobs/1/", "<html><body><h1>One</h1></body></html>"),
            ],
            CrawlSettings::default(),
        );
        let mut sink = MemorySink::new();
        let start = Url::parse("https://djinni.co/jobs/").unwrap();

        let summary = crawler.run(&start, &mut sink).await.unwrap();
        assert_eq!(summary.index_pages, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(sink.records[0].title, "One");
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_is_counted() {
        let crawler = crawler(&[("https://djinni.co/jobs/", SELF_LINKED_INDEX)], CrawlSettings::default());
        let mut sink = MemorySink::new();
        let start = Url::parse("https://djinni.co/jobs/").unwrap();

        let summary = crawler.run(&start, &mut sink).await.unwrap();
        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(summary.detail_pages, 0);
        assert!(sink.records.is_empty());
    }

    #[rstest]
    #[case("https://djinni.co/jobs/1/", true)]
    #[case("https://www.djinni.co/jobs/1/", true)]
    #[case("https://DJINNI.CO/jobs/1/", true)]
    #[case("https://other.com/test", false)]
    #[case("https://notdjinni.co/jobs/1/", false)]
    #[case("https://djinni.co.evil.com/jobs/1/", false)]
    fn test_allowed_domains(#[case] url: &str, #[case] allowed: bool) {
        let settings = CrawlSettings::default();
        assert_eq!(settings.is_allowed(&Url::parse(url).unwrap()), allowed);
    }

    #[test]
    fn test_empty_allowed_domains_allows_any_host() {
        let settings = CrawlSettings {
            allowed_domains: Vec::new(),
            ..CrawlSettings::default()
        };
        assert!(settings.is_allowed(&Url::parse("https://other.com/test").unwrap()));
    }

    #[tokio::test]
    async fn test_offsite_links_are_not_fetched() {
        let index = r#"
            <a class="job-list-item__link" href="/jobs/1/">One</a>
            <a class="job-list-item__link" href="https://other.com/jobs/2/">Elsewhere</a>
            <ul class="pagination"><li><a href="https://other.com/jobs/?page=2">next</a></li></ul>
        "#;
        let crawler = crawler(
            &[
                ("https://djinni.co/jobs/", index),
                ("https://djinni.co/jobs/1/", "<html><body><h1>One</h1></body></html>"),
                ("https://other.com/jobs/2/", "<html><body><h1>Elsewhere</h1></body></html>"),
                ("https://other.com/jobs/?page=2", SELF_LINKED_INDEX),
            ],
            CrawlSettings::default(),
        );
        let mut sink = MemorySink::new();
        let start = Url::parse("https://djinni.co/jobs/").unwrap();

        let summary = crawler.run(&start, &mut sink).await.unwrap();
        assert_eq!(summary.index_pages, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.offsite_links, 2);
        assert_eq!(summary.fetch_failures, 0);
        assert_eq!(sink.records[0].url, "https://djinni.co/jobs/1/");
    }

    #[test]
    fn test_settings_from_config() {
        let config = CrawlingConfig {
            max_pages: Some(3),
            max_concurrent_details: 2,
            ..CrawlingConfig::default()
        };
        let settings = CrawlSettings::from(&config);
        assert_eq!(settings.max_pages, Some(3));
        assert_eq!(settings.max_concurrent_details, 2);
        assert_eq!(settings.allowed_domains, config.allowed_domains);
    }

    #[test]
    fn test_summary_display() {
        let summary = CrawlSummary {
            index_pages: 2,
            detail_pages: 5,
            records: 4,
            skipped_records: 1,
            fetch_failures: 0,
            offsite_links: 3,
        };
        assert_eq!(
            summary.to_string(),
            "2 index pages, 5 detail pages, 4 records, 1 skipped, 0 fetch failures, 3 off-site links"
        );
    }
}
