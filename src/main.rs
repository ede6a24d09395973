#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use url::Url;

use vacancy_scraper::infrastructure::logging::{init_logging_with_config, log_system_info};
use vacancy_scraper::infrastructure::{
    AppConfig, CrawlSettings, HttpClient, HttpClientConfig, JsonLinesSink, ListingDetailParser,
    ListingIndexParser, VacancyCrawler,
};
use vacancy_scraper::TechnologyVocabulary;

#[derive(Parser)]
#[command(name = "vacancy-scraper")]
#[command(about = "Crawl djinni.co job listings into JSON lines", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First listing index page
    #[arg(long)]
    start_url: Option<Url>,

    /// Output file, "-" for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many index pages
    #[arg(long)]
    max_pages: Option<u32>,

    /// Technology vocabulary file, one name per line
    #[arg(long)]
    technologies: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply_to(self, config: &mut AppConfig) {
        if let Some(start_url) = self.start_url {
            config.crawling.start_url = start_url.to_string();
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if self.max_pages.is_some() {
            config.crawling.max_pages = self.max_pages;
        }
        if let Some(technologies) = self.technologies {
            config.parsing.technologies_path = Some(technologies);
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    init_logging_with_config(&config.logging)?;
    log_system_info();

    let vocabulary = match &config.parsing.technologies_path {
        Some(path) => TechnologyVocabulary::from_file(path)?,
        None => TechnologyVocabulary::default(),
    };
    info!("Technology vocabulary: {} entries", vocabulary.len());

    let index_parser = ListingIndexParser::with_config(&config.parsing.listing_index_selectors)?;
    let detail_parser = ListingDetailParser::with_config(&config.parsing, vocabulary)?;
    let client = HttpClient::new(HttpClientConfig::from(&config.crawling))?;
    info!(
        "HTTP client: {} requests/s, {}s timeout",
        client.config().max_requests_per_second,
        client.config().timeout_seconds
    );

    let crawler = VacancyCrawler::new(
        client,
        index_parser,
        detail_parser,
        CrawlSettings::from(&config.crawling),
    );

    let start_url = Url::parse(&config.crawling.start_url)
        .with_context(|| format!("Invalid start URL: {}", config.crawling.start_url))?;
    let mut sink = JsonLinesSink::open(&config.output)?;

    let summary = crawler.run(&start_url, &mut sink).await?;
    info!("Wrote {} records to {}", sink.written(), config.output.path.display());
    info!("Summary: {}", summary);

    Ok(())
}
