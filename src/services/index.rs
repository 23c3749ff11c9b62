// src/services/index.rs

//! Gazette discovery on the notifications index page.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{GazetteDate, GazetteRef, SourceConfig};
use crate::services::parse_selector;
use crate::utils::{normalize_whitespace, resolve};

/// Finds links to the most recent gazette editions of the target year.
pub struct IndexExtractor {
    anchor_sel: Selector,
    title_re: Regex,
    path_segment: String,
    target_year: i32,
    max_gazettes: usize,
}

impl IndexExtractor {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        Ok(Self {
            anchor_sel: parse_selector("a[href]")?,
            title_re: Regex::new(
                r"(?i)extra\s*-?\s*ordinary\s+gazette\s+date\s*:?\s*(\d{1,2})\s*/\s*(\d{1,2})\s*/\s*(\d{4})",
            )?,
            path_segment: source.gazette_path_segment.to_lowercase(),
            target_year: source.target_year,
            max_gazettes: source.max_gazettes,
        })
    }

    /// Collect gazette refs in document order.
    ///
    /// The index lists editions newest-first, so the scan stops after
    /// `max_gazettes` matches.
    pub fn extract(&self, html: &str, page_url: &str) -> Vec<GazetteRef> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut refs = Vec::new();

        for anchor in document.select(&self.anchor_sel) {
            if refs.len() >= self.max_gazettes {
                break;
            }

            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if !href.to_lowercase().contains(&self.path_segment) {
                continue;
            }

            let text = normalize_whitespace(&anchor.text().collect::<String>());
            let Some(date) = self.parse_title_date(&text) else {
                continue;
            };
            if date.year() != self.target_year {
                log::debug!("Skipping gazette {} outside target year", date);
                continue;
            }

            let Some(url) = resolve(page_url, href) else {
                log::warn!("Unresolvable gazette link '{}' on {}", href, page_url);
                continue;
            };
            if seen.insert(url.clone()) {
                refs.push(GazetteRef { url, date });
            }
        }

        log::info!(
            "Found {} gazette page(s) for {} on {}",
            refs.len(),
            self.target_year,
            page_url
        );
        refs
    }

    fn parse_title_date(&self, text: &str) -> Option<GazetteDate> {
        let caps = self.title_re.captures(text)?;
        GazetteDate::from_parts(&caps[1], &caps[2], &caps[3])
    }
}
