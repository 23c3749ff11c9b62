// src/pipeline/discover.rs

//! Notification discovery pipeline.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{Config, GazetteRef, NotificationItem};
use crate::services::{GazetteExtractor, IndexExtractor, fold_pages, rank};
use crate::utils::http::PageFetcher;

/// Summary of one discovery run.
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    /// Ranked, truncated items
    pub items: Vec<NotificationItem>,
    /// Gazette pages visited
    pub gazette_total: usize,
    /// Gazette pages that could not be fetched
    pub gazette_failures: usize,
    /// One message per skipped gazette page
    pub warnings: Vec<String>,
}

/// Index → gazette pages → ranked items.
///
/// Extraction rules are fixed at construction; every [`run`](Self::run)
/// builds its own candidate list.
pub struct FeedPipeline {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    index: IndexExtractor,
    gazette: GazetteExtractor,
}

impl FeedPipeline {
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let index = IndexExtractor::new(&config.source)?;
        let gazette = GazetteExtractor::new(&config.source)?;
        Ok(Self {
            config,
            fetcher,
            index,
            gazette,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the pipeline and keep at most `limit` items.
    ///
    /// A failed index fetch aborts the run. A failed gazette fetch only drops
    /// that page and is reported in [`DiscoveryOutcome::warnings`].
    pub async fn run(&self, limit: usize) -> Result<DiscoveryOutcome> {
        let source = &self.config.source;
        log::info!("Fetching notifications index {}", source.index_url);

        let index_page = self.fetcher.fetch(&source.index_url).await?;
        let gazettes = self.index.extract(&index_page.body, &index_page.url);

        let mut outcome = self.fetch_gazettes(&gazettes).await;
        log::info!(
            "Collected {} candidate(s) from {}/{} gazette page(s)",
            outcome.items.len(),
            outcome.gazette_total - outcome.gazette_failures,
            outcome.gazette_total
        );

        outcome.items = rank(std::mem::take(&mut outcome.items), limit);
        Ok(outcome)
    }

    /// Fetch and extract gazette pages with bounded concurrency.
    ///
    /// Results are folded in discovery order whatever order fetches finish in.
    async fn fetch_gazettes(&self, gazettes: &[GazetteRef]) -> DiscoveryOutcome {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let concurrency = self.config.crawler.max_concurrent.max(1);
        let fetcher = Arc::clone(&self.fetcher);

        let mut outcome = DiscoveryOutcome {
            gazette_total: gazettes.len(),
            ..DiscoveryOutcome::default()
        };

        let mut pages = Vec::with_capacity(gazettes.len());
        let mut page_stream = stream::iter(gazettes.to_vec())
            .map(move |gazette| {
                let fetcher = Arc::clone(&fetcher);
                async move {
                    let result = fetcher.fetch(&gazette.url).await;
                    (gazette, result)
                }
            })
            .buffered(concurrency);

        while let Some((gazette, result)) = page_stream.next().await {
            match result {
                Ok(page) => pages.push(self.gazette.extract(&page.body, &gazette)),
                Err(error) => {
                    outcome.gazette_failures += 1;
                    log::warn!(
                        "Failed to fetch gazette {} ({}): {}",
                        gazette.date,
                        gazette.url,
                        error
                    );
                    outcome.warnings.push(format!(
                        "Skipped gazette {} ({}): {}",
                        gazette.date, gazette.url, error
                    ));
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        outcome.items = fold_pages(pages);
        outcome
    }
}
