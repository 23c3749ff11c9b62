//! AWS Lambda entry point for the gazette feed.
//!
//! Deploy with `cargo lambda build --release --features lambda` behind an
//! API Gateway proxy integration.
//!
//! ## Environment Variables
//!
//! - `GAZETTE_INDEX_URL`: notifications index page
//! - `TARGET_YEAR`: year to extract
//! - `CRAWL_TIMEOUT_SECS`: HTTP request timeout
//! - `MAX_CONCURRENT`: gazette pages fetched at once
//! - `REQUEST_DELAY_MS`: delay after each gazette fetch
//! - `RUST_LOG`: log level (e.g., `info`, `debug`)

use gazette_feed::lambda::handler;
use lambda_runtime::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Gazette feed Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}
