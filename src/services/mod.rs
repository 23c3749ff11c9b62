//! Service layer for the feed pipeline.
//!
//! This module contains the extraction and ordering logic:
//! - Gazette discovery on the index page (`IndexExtractor`)
//! - Notification extraction from gazette pages (`GazetteExtractor`)
//! - Folding page results (`fold_pages`)
//! - Feed ordering (`rank`)

mod gazette;
mod index;
mod normalize;
mod ranker;

use scraper::Selector;

use crate::error::{AppError, Result};

pub use gazette::GazetteExtractor;
pub use index::IndexExtractor;
pub use normalize::fold_pages;
pub use ranker::rank;

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
