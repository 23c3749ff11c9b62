// src/models/mod.rs

//! Domain models for the feed pipeline.

mod config;
mod gazette;
mod notification;

// Re-export all public types
pub use config::{Config, CrawlerConfig, FeedConfig, ServerConfig, SourceConfig};
pub use gazette::{GazetteDate, GazetteRef};
pub use notification::{ErrorEnvelope, FeedEnvelope, NotificationItem};
