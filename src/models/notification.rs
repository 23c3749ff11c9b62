// src/models/notification.rs

//! Notification records and the feed envelopes that carry them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::GazetteDate;

/// One document reference extracted from a gazette page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// Anchor text with whitespace collapsed
    pub title: String,

    /// Absolute URL of the notification document
    pub pdf_url: String,

    /// Category number, `NNN/<year>`
    pub cat_no: Option<String>,

    /// Date of the gazette that published the document
    pub gazette_date: GazetteDate,

    /// Application deadline printed on the gazette page, `dd-mm-yyyy`
    pub last_date: Option<String>,

    /// Gazette page the item was found on
    pub source: String,
}

impl NotificationItem {
    /// Ordering key of the category number.
    ///
    /// Significant digits compared by length, then lexically, so numbers of
    /// any width order numerically. `None` when absent or not numeric, which
    /// ranks below every number.
    pub fn cat_no_rank(&self) -> Option<(usize, &str)> {
        let digits = self.cat_no.as_deref()?.split('/').next()?.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let significant = digits.trim_start_matches('0');
        Some((significant.len(), significant))
    }
}

/// Successful feed response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEnvelope {
    /// ISO-8601 time the feed was assembled
    pub updated_at: String,

    pub count: usize,

    pub items: Vec<NotificationItem>,

    /// Gazette pages that could not be read during this run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl FeedEnvelope {
    pub fn new(items: Vec<NotificationItem>, warnings: Vec<String>) -> Self {
        Self::at(Utc::now(), items, warnings)
    }

    pub fn at(
        updated_at: DateTime<Utc>,
        items: Vec<NotificationItem>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            count: items.len(),
            items,
            warnings,
        }
    }
}

/// Failure response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
