// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a URL string against a base URL string.
///
/// Returns `None` when the base is not absolute, the result cannot be parsed,
/// or it is not an `http`/`https` URL (`mailto:`, `javascript:` and the like).
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let url = base.join(href.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the path of `url` ends in one of `extensions` (case-insensitive).
///
/// Query strings and fragments are ignored.
pub fn has_extension(url: &str, extensions: &[String]) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or("").to_string(),
    };
    let path = path.to_ascii_lowercase();

    extensions.iter().any(|ext| {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        !ext.is_empty() && path.ends_with(&format!(".{ext}"))
    })
}
