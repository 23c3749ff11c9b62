// src/lambda/mod.rs

//! AWS Lambda handler for the feed.
//!
//! Accepts an API Gateway proxy event, runs the pipeline and answers with a
//! proxy response (`statusCode`, `headers`, `body`).

use std::collections::BTreeMap;
use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::{CONTENT_TYPE_JSON, FeedResponse, respond};
use crate::error::Result;
use crate::models::Config;
use crate::pipeline::FeedPipeline;
use crate::utils::http::HttpFetcher;

/// The parts of an API Gateway proxy event the feed reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
}

impl ProxyRequest {
    pub fn limit(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get("limit"))
            .map(String::as_str)
    }
}

/// API Gateway proxy response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<FeedResponse> for ProxyResponse {
    fn from(response: FeedResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        if let Some(cache_control) = response.cache_control {
            headers.insert("Cache-Control".to_string(), cache_control);
        }
        Self {
            status_code: response.status,
            headers,
            body: response.body,
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<ProxyRequest>,
) -> std::result::Result<ProxyResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    let response = match build_pipeline() {
        Ok(pipeline) => respond(&pipeline, request.limit()).await,
        Err(e) => {
            tracing::error!("Pipeline setup failed: {}", e);
            FeedResponse::error(e)
        }
    };

    info!(
        "Feed request finished with status {} in {}ms",
        response.status,
        start.elapsed().as_millis()
    );
    Ok(response.into())
}

/// Build the pipeline from defaults plus environment overrides.
fn build_pipeline() -> Result<FeedPipeline> {
    let mut config = Config::default();
    config.apply_env();
    config.validate()?;

    let fetcher = HttpFetcher::from_config(&config.crawler)?;
    FeedPipeline::new(Arc::new(config), Arc::new(fetcher))
}
