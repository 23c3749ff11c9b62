// src/models/gazette.rs

//! Gazette edition references.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AppError, Result};

/// A gazette publishing date, rendered as `dd/mm/yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GazetteDate(NaiveDate);

impl GazetteDate {
    const FORMAT: &'static str = "%d/%m/%Y";

    /// Build a date from day, month and year components.
    pub fn from_dmy(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Build a date from captured textual components, e.g. `("7", "03", "2025")`.
    pub fn from_parts(day: &str, month: &str, year: &str) -> Option<Self> {
        Self::from_dmy(day.parse().ok()?, month.parse().ok()?, year.parse().ok()?)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for GazetteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for GazetteDate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|e| AppError::validation(format!("Invalid gazette date '{s}': {e}")))
    }
}

impl Serialize for GazetteDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GazetteDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A link to one gazette edition found on the notifications index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteRef {
    /// Absolute URL of the gazette page
    pub url: String,

    /// Edition date as printed in the index link
    pub date: GazetteDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads() {
        let date = GazetteDate::from_parts("7", "3", "2025").unwrap();
        assert_eq!(date.to_string(), "07/03/2025");
        assert_eq!(date.year(), 2025);
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(GazetteDate::from_dmy(31, 2, 2025).is_none());
        assert!("32/01/2025".parse::<GazetteDate>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier: GazetteDate = "28/12/2024".parse().unwrap();
        let later: GazetteDate = "02/01/2025".parse().unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serializes_as_dmy_string() {
        let date: GazetteDate = "15/08/2025".parse().unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"15/08/2025\"");
        let back: GazetteDate = serde_json::from_str("\"15/08/2025\"").unwrap();
        assert_eq!(back, date);
    }
}
