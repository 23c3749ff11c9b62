// src/services/normalize.rs

//! Folding of per-page extraction results into one candidate set.

use std::collections::HashSet;

use crate::models::NotificationItem;

/// Flatten page results in discovery order, keeping the first item per `pdf_url`.
pub fn fold_pages<I>(pages: I) -> Vec<NotificationItem>
where
    I: IntoIterator<Item = Vec<NotificationItem>>,
{
    let mut seen = HashSet::new();
    let mut folded = Vec::new();
    let mut duplicates = 0usize;

    for item in pages.into_iter().flatten() {
        if seen.insert(item.pdf_url.clone()) {
            folded.push(item);
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        log::debug!("Dropped {} duplicate document link(s)", duplicates);
    }
    folded
}
