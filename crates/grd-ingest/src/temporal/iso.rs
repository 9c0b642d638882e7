//! ISO-formatted text dates.

use chrono::{NaiveDate, NaiveDateTime};

use super::{CANONICAL_DATE, CANONICAL_DATETIME};

const ISO_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
const ISO_DATE: &str = "%Y-%m-%d";

/// Rewrites `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` text into canonical form.
///
/// Only text containing `-` and at least 10 characters is considered; text
/// that also contains a space must parse as a full date-time. Returns `None`
/// when the text is not recognised, in which case the caller keeps it as is.
pub fn iso_to_canonical(text: &str) -> Option<String> {
    if !text.contains('-') || text.chars().count() < 10 {
        return None;
    }

    if text.contains(' ') {
        NaiveDateTime::parse_from_str(text, ISO_DATETIME)
            .ok()
            .map(|dt| dt.format(CANONICAL_DATETIME).to_string())
    } else {
        NaiveDate::parse_from_str(text, ISO_DATE)
            .ok()
            .map(|date| date.format(CANONICAL_DATE).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime() {
        assert_eq!(
            iso_to_canonical("2023-05-10 08:30:00").as_deref(),
            Some("10/05/2023 08:30:00")
        );
    }

    #[test]
    fn test_date() {
        assert_eq!(iso_to_canonical("2023-05-10").as_deref(), Some("10/05/2023"));
    }

    #[test]
    fn test_canonical_is_left_alone() {
        assert_eq!(iso_to_canonical("10/05/2023"), None);
        assert_eq!(iso_to_canonical("10/05/2023 08:30:00"), None);
    }

    #[test]
    fn test_unparseable_text() {
        assert_eq!(iso_to_canonical("2023-05"), None);
        assert_eq!(iso_to_canonical("NEONATOLOGIA - UCI"), None);
        assert_eq!(iso_to_canonical("2023-13-10"), None);
        // Date-only text with a space goes down the date-time path and fails.
        assert_eq!(iso_to_canonical("2023-05-10 "), None);
    }
}
