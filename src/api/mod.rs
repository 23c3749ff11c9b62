// src/api/mod.rs

//! Feed responder.
//!
//! Turns a pipeline run into a transport-neutral [`FeedResponse`], shared by
//! the HTTP server and the Lambda handler.

#[cfg(feature = "server")]
pub mod server;

use serde::Serialize;

use crate::error::Result;
use crate::models::{ErrorEnvelope, FeedConfig, FeedEnvelope};
use crate::pipeline::{DiscoveryOutcome, FeedPipeline};

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Status, cache directive and JSON body of a feed response.
#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub status: u16,
    /// Only set on success
    pub cache_control: Option<String>,
    pub body: String,
}

impl FeedResponse {
    /// Build the response for a finished pipeline run.
    pub fn from_result(result: Result<DiscoveryOutcome>, feed: &FeedConfig) -> Self {
        match result {
            Ok(outcome) => {
                let envelope = FeedEnvelope::new(outcome.items, outcome.warnings);
                match serde_json::to_string(&envelope) {
                    Ok(body) => Self {
                        status: 200,
                        cache_control: Some(feed.cache_control()),
                        body,
                    },
                    Err(e) => Self::error(e),
                }
            }
            Err(e) => Self::error(e),
        }
    }

    /// A 500 response carrying `{ "error": message }`.
    pub fn error(message: impl ToString) -> Self {
        let envelope = ErrorEnvelope::new(message.to_string());
        Self {
            status: 500,
            cache_control: None,
            body: to_json(&envelope),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
}

/// Handle one feed request with the raw `limit` query value.
pub async fn respond(pipeline: &FeedPipeline, raw_limit: Option<&str>) -> FeedResponse {
    let feed = &pipeline.config().feed;
    let limit = feed.resolve_limit(raw_limit);

    let result = pipeline.run(limit).await;
    if let Err(e) = &result {
        log::error!("Feed request failed: {}", e);
    }
    FeedResponse::from_result(result, feed)
}
