//! Date normalization against the known statement and invoice formats.

use chrono::NaiveDate;

/// Known date formats, tried in priority order.
///
/// Day-first forms come before month-first so that an ambiguous value like
/// `05/04/2024` resolves the way Indian bank exports write it. Two-digit
/// year forms precede their four-digit twins: `%Y` happily consumes a
/// two-digit year as the literal year 24, while `%y` leaves a four-digit
/// year with trailing input and fails cleanly.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y",
];

/// Parse a candidate date string against the known formats.
///
/// Returns the first successful parse; `None` when no format matches.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Normalize a candidate date string to ISO (YYYY-MM-DD) form.
pub fn normalize_date_string(raw: &str) -> Option<String> {
    normalize_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_calendar_date_in_all_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        for raw in ["15/01/2024", "15/01/24", "15-01-2024", "15-01-24", "2024-01-15"] {
            assert_eq!(normalize_date(raw), Some(expected), "format: {raw}");
        }
    }

    #[test]
    fn month_first_is_tried_after_day_first() {
        // Day slot 15 is an invalid month, so only %m/%d matches.
        let date = normalize_date("01/15/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        // Both readings are valid; day-first wins.
        let date = normalize_date("05/04/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
    }

    #[test]
    fn iso_rendering() {
        assert_eq!(normalize_date_string("31/12/2023").as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(normalize_date("Closing Balance"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("32/01/2024"), None);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(normalize_date("  15/01/2024  ").is_some());
    }
}
