//! Configuration infrastructure
//!
//! Configuration is layered:
//! 1. Built-in defaults (`defaults` module)
//! 2. Optional TOML file
//! 3. `VACANCY_SCRAPER__SECTION__KEY` environment variables
//!
//! Command line flags are applied on top by the binary.

#![allow(clippy::uninlined_format_args)]

use crate::infrastructure::parsing::ParsingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Prefix for environment overrides, e.g. `VACANCY_SCRAPER__CRAWLING__MAX_PAGES=3`
pub const ENV_PREFIX: &str = "VACANCY_SCRAPER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub crawling: CrawlingConfig,
    pub parsing: ParsingConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Crawl driver and HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlingConfig {
    /// First listing index page
    pub start_url: String,

    /// Stop after this many index pages; unlimited when unset
    pub max_pages: Option<u32>,

    /// Detail pages fetched concurrently per index page
    pub max_concurrent_details: usize,

    /// Global request rate limit
    pub max_requests_per_second: u32,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    pub user_agent: String,

    pub follow_redirects: bool,

    /// Hosts that may be fetched, subdomains included; empty allows any host
    pub allowed_domains: Vec<String>,
}

impl Default for CrawlingConfig {
    fn default() -> Self {
        Self {
            start_url: djinni::START_URL.to_string(),
            max_pages: None,
            max_concurrent_details: defaults::MAX_CONCURRENT_DETAILS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
            follow_redirects: true,
            allowed_domains: vec![djinni::DOMAIN.to_string()],
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; platform data directory when unset
    pub directory: Option<PathBuf>,

    /// Log file name inside `directory`
    pub file_name: String,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_filters = HashMap::new();
        module_filters.insert("reqwest".to_string(), "info".to_string());
        module_filters.insert("hyper".to_string(), "warn".to_string());
        module_filters.insert("html5ever".to_string(), "warn".to_string());
        module_filters.insert("selectors".to_string(), "warn".to_string());

        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            directory: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters,
        }
    }
}

/// Where records go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON lines file; "-" writes to stdout
    pub path: PathBuf,

    /// Append to an existing file instead of truncating it
    pub append: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::OUTPUT_PATH),
            append: false,
        }
    }
}

impl AppConfig {
    /// Load from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_environment(path, None)
    }

    /// Same as [`AppConfig::load`], reading overrides from `environment`
    /// instead of the process environment when it is given
    pub fn load_with_environment(
        path: Option<&Path>,
        environment: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("crawling.allowed_domains")
                    .try_parsing(true)
                    .source(environment),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        match path {
            Some(path) => info!("Loaded configuration from: {:?}", path),
            None => info!("Using default configuration with environment overrides"),
        }
        Ok(config)
    }

    /// Check values that would make a crawl impossible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.crawling.start_url).is_err() {
            return Err(ConfigError::Validation {
                message: format!("start_url is not a valid URL: {}", self.crawling.start_url),
            });
        }

        if self.crawling.max_concurrent_details == 0 {
            return Err(ConfigError::Validation {
                message: "max_concurrent_details must be greater than 0".to_string(),
            });
        }

        if self.crawling.max_requests_per_second == 0 {
            return Err(ConfigError::Validation {
                message: "max_requests_per_second must be greater than 0".to_string(),
            });
        }

        if self.crawling.allowed_domains.iter().any(|domain| domain.trim().is_empty()) {
            return Err(ConfigError::Validation {
                message: "allowed_domains must not contain empty entries".to_string(),
            });
        }

        if self.crawling.max_pages == Some(0) {
            return Err(ConfigError::Validation {
                message: "max_pages must be greater than 0 when set".to_string(),
            });
        }

        if !self.logging.console_output && !self.logging.file_output {
            return Err(ConfigError::Validation {
                message: "at least one of console_output or file_output must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

/// djinni.co URLs
pub mod djinni {
    /// Host the crawl stays on
    pub const DOMAIN: &str = "djinni.co";

    /// Python vacancies search, the default crawl entry point
    pub const START_URL: &str = "https://djinni.co/jobs/?primary_keyword=Python";
}

/// Default configuration values
pub mod defaults {
    /// Default detail pages fetched concurrently
    pub const MAX_CONCURRENT_DETAILS: usize = 4;

    /// Default request rate limit
    pub const MAX_REQUESTS_PER_SECOND: u32 = 4;

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = "vacancy-scraper/0.2 (+https://djinni.co)";

    /// Default output file
    pub const OUTPUT_PATH: &str = "vacancies.jsonl";

    // Log configuration defaults
    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Default log file name
    pub const LOG_FILE_NAME: &str = "vacancy-scraper.log";
}
