//! Pipeline entry points.
//!
//! - `FeedPipeline`: fetch the index, visit recent gazettes, rank the items

pub mod discover;

pub use discover::{DiscoveryOutcome, FeedPipeline};
