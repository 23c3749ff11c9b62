// src/services/ranker.rs

//! Feed ordering.

use crate::models::NotificationItem;

/// Sort newest gazette first, then by category number descending, and keep
/// at most `limit` items.
///
/// Items without a usable category number rank below every numbered item of
/// the same date. The sort is stable, so full ties keep discovery order.
pub fn rank(mut items: Vec<NotificationItem>, limit: usize) -> Vec<NotificationItem> {
    items.sort_by(|a, b| {
        b.gazette_date
            .cmp(&a.gazette_date)
            .then_with(|| b.cat_no_rank().cmp(&a.cat_no_rank()))
    });
    items.truncate(limit);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, date: &str, cat_no: Option<&str>) -> NotificationItem {
        NotificationItem {
            title: title.to_string(),
            pdf_url: format!("https://example.com/{title}.pdf"),
            cat_no: cat_no.map(str::to_string),
            gazette_date: date.parse().unwrap(),
            last_date: None,
            source: "https://example.com/gazette".to_string(),
        }
    }

    fn titles(items: &[NotificationItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_orders_by_date_then_cat_no() {
        let ranked = rank(
            vec![
                item("old", "01/07/2025", Some("900/2025")),
                item("bare", "15/08/2025", None),
                item("low", "15/08/2025", Some("12/2025")),
                item("high", "15/08/2025", Some("382/2025")),
                item("mid", "02/08/2025", Some("50/2025")),
            ],
            40,
        );
        assert_eq!(titles(&ranked), vec!["high", "low", "bare", "mid", "old"]);
    }

    #[test]
    fn test_date_compare_is_chronological_not_lexical() {
        let ranked = rank(
            vec![
                item("jan", "31/01/2025", None),
                item("feb", "01/02/2025", None),
            ],
            40,
        );
        assert_eq!(titles(&ranked), vec!["feb", "jan"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(
            vec![
                item("first", "15/08/2025", None),
                item("second", "15/08/2025", Some("bad/2025")),
            ],
            40,
        );
        assert_eq!(titles(&ranked), vec!["first", "second"]);
    }

    #[test]
    fn test_wide_cat_no_ranks_above_narrow() {
        let ranked = rank(
            vec![
                item("bare", "15/08/2025", None),
                item("small", "15/08/2025", Some("999/2025")),
                item("wide", "15/08/2025", Some("40000000000000000000/2025")),
            ],
            40,
        );
        assert_eq!(titles(&ranked), vec!["wide", "small", "bare"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let items = (0..10)
            .map(|n| item(&format!("n{n}"), "15/08/2025", Some(&format!("{n}/2025"))))
            .collect();
        let ranked = rank(items, 5);
        assert_eq!(titles(&ranked), vec!["n9", "n8", "n7", "n6", "n5"]);
    }
}
