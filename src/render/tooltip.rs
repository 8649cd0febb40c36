//! Per-cell labels

use chrono::NaiveDate;

/// `(date, count) -> label`
pub type TooltipFormat = fn(&str, u64) -> String;

fn pluralize(count: u64) -> String {
    format!(
        "{} contribution{}",
        count,
        if count != 1 { "s" } else { "" }
    )
}

/// `"1/5/2024: 3 contributions"` (US locale date); unparseable dates are kept verbatim
pub fn default_tooltip(date: &str, count: u64) -> String {
    let shown = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| date.to_string());
    format!("{}: {}", shown, pluralize(count))
}

/// `"Fri Jan 05 2024: 1 contribution"`
pub fn long_date_tooltip(date: &str, count: u64) -> String {
    let shown = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|_| date.to_string());
    format!("{}: {}", shown, pluralize(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tooltip_singular() {
        assert_eq!(default_tooltip("2024-01-05", 1), "1/5/2024: 1 contribution");
    }

    #[test]
    fn test_default_tooltip_plural() {
        assert_eq!(default_tooltip("2024-01-05", 2), "1/5/2024: 2 contributions");
        assert_eq!(default_tooltip("2024-12-31", 0), "12/31/2024: 0 contributions");
    }

    #[test]
    fn test_default_tooltip_bad_date() {
        assert_eq!(default_tooltip("someday", 1), "someday: 1 contribution");
    }

    #[test]
    fn test_long_date_tooltip() {
        assert_eq!(
            long_date_tooltip("2024-01-05", 1),
            "Fri Jan 05 2024: 1 contribution"
        );
        assert_eq!(
            long_date_tooltip("2024-01-06", 30),
            "Sat Jan 06 2024: 30 contributions"
        );
    }
}
