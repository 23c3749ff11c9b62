// src/utils/http.rs

//! HTTP client utilities.

#[cfg(any(test, feature = "test-util"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "test-util"))]
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// A page returned by a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Source of raw page bodies.
///
/// Non-success statuses are reported as [`AppError::Status`], so callers only
/// ever see pages that were actually served.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// [`PageFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::status(url, status.as_u16()));
        }

        let final_url = response.url().to_string();
        if final_url != url {
            log::debug!("{} redirected to {}", url, final_url);
        }
        let body = response.text().await?;
        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// In-memory [`PageFetcher`] serving fixed pages.
///
/// Unknown URLs answer 404. Every requested URL is recorded.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, (u16, String)>,
    redirects: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-util"))]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    /// Serve `body` with an explicit status at `url`.
    pub fn with_status(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.pages.insert(url.into(), (status, body.into()));
        self
    }

    /// Answer requests for `from` with the page stored at `to`.
    pub fn with_redirect(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.redirects.insert(from.into(), to.into());
        self
    }

    /// Hold the answer for `url` back by `delay`.
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// URLs requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if let Ok(mut urls) = self.requested.lock() {
            urls.push(url.to_string());
        }
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }

        let served = self.redirects.get(url).map(String::as_str).unwrap_or(url);
        match self.pages.get(served) {
            Some((status, body)) if (200..300).contains(status) => Ok(FetchedPage {
                url: served.to_string(),
                status: *status,
                body: body.clone(),
            }),
            Some((status, _)) => Err(AppError::status(served, *status)),
            None => Err(AppError::status(served, 404)),
        }
    }
}
