// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream site and extraction rules
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Feed limits and cache directive
    #[serde(default)]
    pub feed: FeedConfig,

    /// Local HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override selected values from environment variables.
    ///
    /// Unparsable values are ignored and the configured value is kept.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("GAZETTE_INDEX_URL") {
            if !url.trim().is_empty() {
                self.source.index_url = url;
            }
        }

        if let Ok(year) = std::env::var("TARGET_YEAR") {
            if let Ok(year) = year.parse() {
                self.source.target_year = year;
            }
        }

        if let Ok(timeout) = std::env::var("CRAWL_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.crawler.timeout_secs = secs;
            }
        }

        if let Ok(concurrent) = std::env::var("MAX_CONCURRENT") {
            if let Ok(n) = concurrent.parse() {
                self.crawler.max_concurrent = n;
            }
        }

        if let Ok(delay) = std::env::var("REQUEST_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.crawler.request_delay_ms = ms;
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.source.index_url).map_err(|e| {
            AppError::config(format!(
                "source.index_url is not an absolute URL ({}): {}",
                e, self.source.index_url
            ))
        })?;
        if !(1000..=9999).contains(&self.source.target_year) {
            return Err(AppError::config(
                "source.target_year must be a four-digit year",
            ));
        }
        if self.source.gazette_path_segment.trim().is_empty() {
            return Err(AppError::config("source.gazette_path_segment is empty"));
        }
        if self.source.document_extensions.is_empty() {
            return Err(AppError::config("No document extensions defined"));
        }
        if self.source.max_gazettes == 0 {
            return Err(AppError::config("source.max_gazettes must be > 0"));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.feed.min_limit == 0 || self.feed.min_limit > self.feed.max_limit {
            return Err(AppError::config(
                "feed.min_limit must be > 0 and <= feed.max_limit",
            ));
        }
        if !(self.feed.min_limit..=self.feed.max_limit).contains(&self.feed.default_limit) {
            return Err(AppError::config(
                "feed.default_limit must lie within [feed.min_limit, feed.max_limit]",
            ));
        }
        Ok(())
    }
}

/// Upstream site and extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Notifications index page listing gazette editions newest-first
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// The only year whose gazettes and notifications are kept
    #[serde(default = "defaults::target_year")]
    pub target_year: i32,

    /// Substring a gazette link target must contain
    #[serde(default = "defaults::gazette_path_segment")]
    pub gazette_path_segment: String,

    /// File extensions (without dot) that mark a document link
    #[serde(default = "defaults::document_extensions")]
    pub document_extensions: Vec<String>,

    /// Number of most recent gazette pages to visit
    #[serde(default = "defaults::max_gazettes")]
    pub max_gazettes: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
            target_year: defaults::target_year(),
            gazette_path_segment: defaults::gazette_path_segment(),
            document_extensions: defaults::document_extensions(),
            max_gazettes: defaults::max_gazettes(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum gazette pages fetched at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Delay after each gazette fetch in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            request_delay_ms: 0,
        }
    }
}

/// Feed limits and cache directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "defaults::default_limit")]
    pub default_limit: usize,

    #[serde(default = "defaults::min_limit")]
    pub min_limit: usize,

    #[serde(default = "defaults::max_limit")]
    pub max_limit: usize,

    /// Shared-cache freshness window (`s-maxage`)
    #[serde(default = "defaults::cache_max_age")]
    pub cache_max_age_secs: u64,

    /// Grace period during which stale content may be served
    #[serde(default = "defaults::stale_while_revalidate")]
    pub stale_while_revalidate_secs: u64,
}

impl FeedConfig {
    /// Resolve a raw `limit` query value into the effective item limit.
    ///
    /// Missing or non-numeric input yields `default_limit`; numbers are
    /// truncated toward zero and clamped into `[min_limit, max_limit]`.
    pub fn resolve_limit(&self, raw: Option<&str>) -> usize {
        let parsed = raw.map(str::trim).and_then(|s| {
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        });

        match parsed {
            Some(n) => {
                let min = self.min_limit as i64;
                let max = self.max_limit as i64;
                n.max(min).min(max) as usize
            }
            None => self.default_limit,
        }
    }

    /// `Cache-Control` value attached to successful feed responses.
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.cache_max_age_secs, self.stale_while_revalidate_secs
        )
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::default_limit(),
            min_limit: defaults::min_limit(),
            max_limit: defaults::max_limit(),
            cache_max_age_secs: defaults::cache_max_age(),
            stale_while_revalidate_secs: defaults::stale_while_revalidate(),
        }
    }
}

/// Local HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "defaults::bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn index_url() -> String {
        "https://www.keralapsc.gov.in/notifications".into()
    }
    pub fn target_year() -> i32 {
        2025
    }
    pub fn gazette_path_segment() -> String {
        "gazette".into()
    }
    pub fn document_extensions() -> Vec<String> {
        vec!["pdf".into()]
    }
    pub fn max_gazettes() -> usize {
        4
    }

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; gazette-feed/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Feed defaults
    pub fn default_limit() -> usize {
        40
    }
    pub fn min_limit() -> usize {
        5
    }
    pub fn max_limit() -> usize {
        100
    }
    pub fn cache_max_age() -> u64 {
        3 * 60 * 60
    }
    pub fn stale_while_revalidate() -> u64 {
        24 * 60 * 60
    }

    // Server defaults
    pub fn bind() -> String {
        "127.0.0.1:8080".into()
    }
}
