// src/services/gazette.rs

//! Notification extraction from a single gazette page.

use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{GazetteDate, GazetteRef, NotificationItem, SourceConfig};
use crate::services::parse_selector;
use crate::utils::{has_extension, normalize_whitespace, resolve};

/// Extracts target-year notification documents from gazette pages.
pub struct GazetteExtractor {
    anchor_sel: Selector,
    page_date_re: Regex,
    last_date_re: Regex,
    cat_no_re: Regex,
    year_tag: String,
    target_year: i32,
    extensions: Vec<String>,
}

impl GazetteExtractor {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let year = source.target_year;
        Ok(Self {
            anchor_sel: parse_selector("a[href]")?,
            page_date_re: Regex::new(
                r"(?i)gazette\s+date\s*:?\s*(\d{1,2})\s*/\s*(\d{1,2})\s*/\s*(\d{4})",
            )?,
            last_date_re: Regex::new(r"(?i)last\s+date.{0,120}?\b(\d{1,2})-(\d{1,2})-(\d{4})\b")?,
            cat_no_re: Regex::new(&format!(
                r"(?i)\(\s*(?:cat(?:egory)?\s*\.?\s*no\s*\.?\s*:?\s*)?(\d+)\s*/\s*{year}\s*\)"
            ))?,
            year_tag: year.to_string(),
            target_year: year,
            extensions: source.document_extensions.clone(),
        })
    }

    /// Extract every qualifying document link on the page fetched for `gazette`.
    pub fn extract(&self, html: &str, gazette: &GazetteRef) -> Vec<NotificationItem> {
        let document = Html::parse_document(html);
        let page_text =
            normalize_whitespace(&document.root_element().text().collect::<Vec<_>>().join(" "));

        let gazette_date = self.page_date(&page_text).unwrap_or_else(|| {
            log::debug!(
                "No gazette date on {}, using index date {}",
                gazette.url,
                gazette.date
            );
            gazette.date
        });
        let last_date = self.last_date(&page_text);

        let mut items = Vec::new();
        for anchor in document.select(&self.anchor_sel) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(pdf_url) = resolve(&gazette.url, href) else {
                continue;
            };
            if !has_extension(&pdf_url, &self.extensions) {
                continue;
            }

            let title = normalize_whitespace(&anchor.text().collect::<String>());
            let cat_no = self.cat_no(&title);
            if cat_no.is_none() && !title.contains(&self.year_tag) {
                continue;
            }

            items.push(NotificationItem {
                title,
                pdf_url,
                cat_no,
                gazette_date,
                last_date: last_date.clone(),
                source: gazette.url.clone(),
            });
        }

        log::debug!("Extracted {} item(s) from {}", items.len(), gazette.url);
        items
    }

    /// Gazette date printed on the page, if it belongs to the target year.
    fn page_date(&self, text: &str) -> Option<GazetteDate> {
        self.page_date_re
            .captures_iter(text)
            .filter_map(|caps| GazetteDate::from_parts(&caps[1], &caps[2], &caps[3]))
            .find(|date| date.year() == self.target_year)
    }

    /// `NNN/<year>` from a `(NNN/<year>)` reference in the title.
    fn cat_no(&self, title: &str) -> Option<String> {
        let caps = self.cat_no_re.captures(title)?;
        Some(format!("{}/{}", &caps[1], self.target_year))
    }

    /// Page-wide application deadline, `dd-mm-yyyy`.
    fn last_date(&self, text: &str) -> Option<String> {
        let caps = self.last_date_re.captures(text)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%d-%m-%Y").to_string())
    }
}
